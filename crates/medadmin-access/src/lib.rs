//! # MedAdmin Access
//!
//! Permission gating for the MedAdmin console.
//!
//! - [`directory`]: The per-session [`PermissionDirectory`] and its load lifecycle
//! - [`guard`]: Route-level decisions ([`RouteAccess`])
//! - [`affordance`]: Action-level gating inside a page
//! - [`navigation`]: The static sidebar and its filtering
//! - [`pages`]: The catalogue of guarded pages
//!
//! Every check here is fail-closed: until a directory has loaded, nothing
//! gated is granted.
//!
//! # Example
//!
//! ```ignore
//! use medadmin_access::{PermissionDirectory, RouteAccess, check_route, visible_navigation};
//! use medadmin_core::permissions;
//!
//! let directory = PermissionDirectory::new();
//! directory.load(api.permissions(&token)).await.ok();
//!
//! if let RouteAccess::Denied(reason) = check_route(&directory, permissions::DOCTOR_READ) {
//!     tracing::debug!(%reason, "redirecting to dashboard");
//! }
//! let menu = visible_navigation(&directory);
//! ```

pub mod affordance;
pub mod directory;
pub mod guard;
pub mod navigation;
pub mod pages;

pub use affordance::{Affordance, gate, permitted_affordances};
pub use directory::{DirectorySnapshot, LoadStatus, PermissionDirectory};
pub use guard::{DenyReason, RouteAccess, check_route};
pub use navigation::{NAVIGATION, NavLink, NavSection, VisibleSection, visible_navigation};
pub use pages::{GuardedPage, PAGES, PageKind, find_page};
