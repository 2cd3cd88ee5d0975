//! # MedAdmin CLI
//!
//! Operator tooling for the MedAdmin console: answers "what can this account
//! see?" without a browser.
//!
//! ## Usage
//!
//! ```ignore
//! use medadmin_access::PermissionDirectory;
//! use medadmin_cli::report;
//!
//! let directory = PermissionDirectory::with_permissions(["doctor-read"]);
//! print!("{}", report::render_navigation(&directory));
//! print!("{}", report::render_check(&directory, "/doctors")?);
//! ```

pub mod report;
