//! Logging and observability configuration.
//!
//! - `LOG_DIR`: Directory for the rolling log files (default: `storage/logs`)
//! - `LOG_LEVEL`: Console level for the console crates when `RUST_LOG` is unset
//!   (default: `info`)
//! - `OBSERVABILITY_ENABLED`: Prometheus metrics on/off (default: on)

use std::env;

use crate::env_flag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub log_level: String,
    pub observability_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "storage/logs".to_string(),
            log_level: "info".to_string(),
            observability_enabled: true,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            observability_enabled: env_flag("OBSERVABILITY_ENABLED")
                .unwrap_or(defaults.observability_enabled),
        }
    }
}
