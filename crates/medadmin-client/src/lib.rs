//! # MedAdmin Client
//!
//! HTTP client for the marketplace REST API the console fronts.
//!
//! - [`ApiClient`]: login, permission list, JSON reads and verbatim forwarding
//! - [`ApiError`]: upstream failures, convertible into [`medadmin_core::AppError`]
//! - [`payload`]: the reply shapes accepted from the upstream
//!
//! # Example
//!
//! ```ignore
//! use medadmin_client::ApiClient;
//! use medadmin_config::UpstreamConfig;
//!
//! let api = ApiClient::new(UpstreamConfig::from_env());
//! let token = api.login("admin@example.com", "secret").await?;
//! let names = api.permissions(&token).await?;
//! ```

pub mod client;
pub mod error;
pub mod payload;

pub use client::{ApiClient, UpstreamResponse};
pub use error::ApiError;
