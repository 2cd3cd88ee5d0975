//! Feature modules of the console gateway.
//!
//! | Module | Routes |
//! |---|---|
//! | [`auth`] | `GET/POST /login`, `POST /logout` |
//! | [`navigation`] | `GET /dashboard`, `GET /navigation` |
//! | [`permissions`] | `GET /session/permissions`, `POST /session/permissions/refresh` |
//! | [`pages`] | One guarded route per page catalogue entry |
//! | [`proxy`] | `ANY /api/{*path}` |

pub mod auth;
pub mod navigation;
pub mod pages;
pub mod permissions;
pub mod proxy;

pub use self::auth::model::LoginRequest;
