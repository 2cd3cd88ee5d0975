//! # MedAdmin Core
//!
//! Core types shared by every crate of the MedAdmin console:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`permissions`]: Typed `"<resource>-<action>"` permissions
//! - [`session`]: The session token and the console's well-known paths
//!
//! # Example
//!
//! ```ignore
//! use medadmin_core::permissions::{self, Permission};
//!
//! let permission: Permission = "doctor-read".parse()?;
//! assert_eq!(permission, permissions::DOCTOR_READ);
//! ```

pub mod errors;
pub mod permissions;
pub mod session;

// Re-export commonly used types at crate root
pub use errors::{AppError, SessionExpired};
pub use permissions::{Action, ParsePermissionError, Permission, Resource};
pub use session::SessionToken;
