//! Dashboard and sidebar, filtered by the session's permissions.

pub mod controller;
pub mod model;
pub mod router;
