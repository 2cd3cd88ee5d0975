//! Token cookie and session lifetime configuration.
//!
//! The cookie name itself is fixed (`token`); only its scope is configurable:
//!
//! - `SESSION_COOKIE_DOMAIN`: Domain attribute (default: unset, host-only)
//! - `SESSION_COOKIE_SECURE`: Mark the cookie `Secure` (default: false)
//! - `SESSION_IDLE_TIMEOUT_SECS`: Drop a session unused for this long (default: 28800)
//! - `SESSION_SWEEP_INTERVAL_SECS`: How often idle sessions are swept (default: 60)

use std::env;
use std::time::Duration;

use crate::env_flag;

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(8 * 60 * 60);
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_domain: Option<String>,
    pub secure: bool,
    pub idle_timeout: Duration,
    pub sweep_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_domain: None,
            secure: false,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cookie_domain: env::var("SESSION_COOKIE_DOMAIN")
                .ok()
                .map(|domain| domain.trim().to_string())
                .filter(|domain| !domain.is_empty()),
            secure: env_flag("SESSION_COOKIE_SECURE").unwrap_or(false),
            idle_timeout: secs_var("SESSION_IDLE_TIMEOUT_SECS").unwrap_or(defaults.idle_timeout),
            sweep_interval: secs_var("SESSION_SWEEP_INTERVAL_SECS")
                .unwrap_or(defaults.sweep_interval),
        }
    }
}

/// A positive number of seconds; zero and garbage fall back to the default.
fn secs_var(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = SessionConfig::default();
        assert_eq!(config.idle_timeout, Duration::from_secs(28_800));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert!(config.cookie_domain.is_none());
        assert!(!config.secure);
    }
}
