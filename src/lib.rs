//! # MedAdmin Console
//!
//! Back-office gateway for a medical marketplace: staff review doctor and
//! clinic registrations, manage users and roles, curate CMS content, manage
//! subscription plans and inspect transactions. The gateway sits between the
//! staff member's browser and the marketplace REST API and owns three things:
//!
//! - **Session/Token Store**: the `token` cookie, set at login and cleared on
//!   logout or on any upstream 401
//! - **Permission Directory**: the session's flat set of `"<resource>-<action>"`
//!   permissions, fetched once after login and checked by exact match
//! - **Access Guard**: a per-route guard that redirects to `/dashboard` when a
//!   permission is missing, plus permission-filtered navigation and actions
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session gate and route guard
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, logout
//! │   ├── navigation/  # Dashboard and sidebar
//! │   ├── permissions/ # Directory snapshot and refresh
//! │   ├── pages/       # Guarded pages from the page catalogue
//! │   └── proxy/       # Pass-through to the marketplace API
//! └── session/          # Token cookie and per-session registry
//! ```
//!
//! Workspace crates:
//!
//! - [`medadmin_core`]: `AppError`, typed permissions, session token
//! - [`medadmin_config`]: Environment-driven configuration
//! - [`medadmin_access`]: Permission directory, guard, navigation, page catalogue
//! - [`medadmin_client`]: Marketplace API client
//!
//! ## Request Flow
//!
//! ```text
//! POST /login ──▶ upstream login ──▶ token cookie ──▶ directory.load()
//! GET /doctors ──▶ require_session ──▶ require_permission(doctor-read)
//!              ├─ allowed ──▶ upstream GET doctor ──▶ PageView (permitted actions only)
//!              └─ denied  ──▶ 303 /dashboard?from=/doctors
//! upstream 401 anywhere ──▶ cookie cleared ──▶ 303 /login
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! API_BASE_URL=https://api.marketplace.example/api/
//! SESSION_COOKIE_DOMAIN=admin.marketplace.example
//! cargo run
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod session;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use medadmin_access;
pub use medadmin_client;
pub use medadmin_config;
pub use medadmin_core;
