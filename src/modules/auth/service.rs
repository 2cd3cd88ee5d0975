use std::sync::Arc;

use medadmin_access::PermissionDirectory;
use medadmin_client::{ApiClient, ApiError};
use medadmin_core::{AppError, SessionToken};
use tracing::{info, instrument, warn};

use super::model::LoginRequest;
use crate::metrics;
use crate::session::SessionRegistry;

pub struct AuthService;

impl AuthService {
    /// Exchanges credentials upstream and opens a fresh session for the token.
    /// The session's directory is returned unloaded.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login(
        api: &ApiClient,
        sessions: &SessionRegistry,
        dto: &LoginRequest,
    ) -> Result<(SessionToken, Arc<PermissionDirectory>), AppError> {
        let token = api.login(&dto.email, &dto.password).await.map_err(|err| {
            let reason = match err {
                ApiError::Rejected { .. } => "invalid_credentials",
                _ => "upstream_error",
            };
            warn!(error = %err, reason, "Login failed");
            metrics::track_login_failure(reason);
            err
        })?;

        let directory = sessions.insert(&token);
        metrics::track_login_success();
        metrics::set_active_sessions(sessions.len());
        info!("Login succeeded");

        Ok((token, directory))
    }

    /// Ends the session held for `token`, if any.
    pub fn logout(sessions: &SessionRegistry, token: &SessionToken) {
        if sessions.remove(token) {
            info!("Logged out");
        }
        metrics::set_active_sessions(sessions.len());
    }
}
