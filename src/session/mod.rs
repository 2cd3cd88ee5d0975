//! Session state held by the gateway.
//!
//! - [`token`]: The `token` cookie (set, read, clear)
//! - [`registry`]: One [`PermissionDirectory`](medadmin_access::PermissionDirectory)
//!   per live session token

pub mod registry;
pub mod token;

pub use registry::SessionRegistry;
pub use token::{clear_token, get_token, set_token};
