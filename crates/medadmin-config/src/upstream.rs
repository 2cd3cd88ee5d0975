//! Upstream marketplace API configuration.
//!
//! - `API_BASE_URL`: Base URL every endpoint path is resolved against
//!   (default: `http://localhost:8000/api/`)

use std::env;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Always ends with a single `/`.
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl UpstreamConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: format!("{}/", base_url.as_ref().trim().trim_end_matches('/')),
        }
    }

    pub fn from_env() -> Self {
        env::var("API_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Resolves an endpoint path such as `role-permission` or `/doctor/12`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}
