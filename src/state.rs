use medadmin_client::ApiClient;
use medadmin_config::{CorsConfig, SessionConfig, UpstreamConfig};

use crate::session::SessionRegistry;

#[derive(Clone, Debug)]
pub struct AppState {
    pub api: ApiClient,
    pub sessions: SessionRegistry,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        upstream: UpstreamConfig,
        session_config: SessionConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self::with_api(ApiClient::new(upstream), session_config, cors_config)
    }

    pub fn with_api(api: ApiClient, session_config: SessionConfig, cors_config: CorsConfig) -> Self {
        Self {
            api,
            sessions: SessionRegistry::new(),
            session_config,
            cors_config,
        }
    }
}

pub fn init_app_state() -> AppState {
    AppState::new(
        UpstreamConfig::from_env(),
        SessionConfig::from_env(),
        CorsConfig::from_env(),
    )
}
