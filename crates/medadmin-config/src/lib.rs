//! # MedAdmin Config
//!
//! Configuration types for the MedAdmin console, loaded from environment
//! variables with a default for every value:
//!
//! - [`upstream`]: Marketplace REST API the console talks to
//! - [`session`]: Token cookie attributes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address
//! - [`logging`]: Log directory, level and observability toggle
//!
//! # Example
//!
//! ```ignore
//! use medadmin_config::{CorsConfig, SessionConfig, UpstreamConfig};
//!
//! dotenvy::dotenv().ok();
//! let upstream = UpstreamConfig::from_env();
//! let session = SessionConfig::from_env();
//! let cors = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod logging;
pub mod server;
pub mod session;
pub mod upstream;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
pub use upstream::UpstreamConfig;

/// Reads a boolean flag. `false`, `0`, `no` and `off` (any case) are false.
pub(crate) fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|value| parse_flag(&value))
}

pub(crate) fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("OFF"));
        assert!(!parse_flag(" 0 "));
    }
}
