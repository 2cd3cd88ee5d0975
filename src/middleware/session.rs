use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use medadmin_access::PermissionDirectory;
use medadmin_core::session::LOGIN_PATH;
use medadmin_core::{AppError, SessionExpired, SessionToken};
use tracing::{info, warn};

use crate::metrics;
use crate::modules::permissions::service::PermissionService;
use crate::session::{clear_token, get_token};
use crate::state::AppState;

/// The authenticated session of the current request.
///
/// Inserted by [`require_session`]; any handler behind it can extract the
/// session's permission directory without it being threaded through.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub directory: Arc<PermissionDirectory>,
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Route is not behind the session middleware")))
    }
}

/// Authentication gate for every console route.
///
/// - No token cookie: redirect to `/login`.
/// - A token the registry has not seen: its directory is loaded before the
///   request proceeds. If that load fails the request is served fail-closed
///   and the session is not registered.
/// - Any response marked [`SessionExpired`] (an upstream 401): the session is
///   dropped, the cookie cleared, and the response replaced by a redirect to
///   `/login`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = get_token(&jar) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let (directory, created) = state.sessions.get_or_create(&token);
    if created {
        metrics::set_active_sessions(state.sessions.len());
        match PermissionService::load(&state.api, &token, &directory).await {
            Err(err) if err.is_unauthenticated() => return expire_session(&state, &token, jar),
            // Not kept: the next request retries the load, as a reload would.
            Err(_) => {
                state.sessions.evict(&token, &directory);
                metrics::set_active_sessions(state.sessions.len());
            }
            Ok(_) => {}
        }
    }

    req.extensions_mut().insert(Session {
        token: token.clone(),
        directory,
    });

    let response = next.run(req).await;

    if response.extensions().get::<SessionExpired>().is_some() {
        return expire_session(&state, &token, jar);
    }
    response
}

/// Drops the session and sends the browser to `/login` without its token.
pub fn expire_session(state: &AppState, token: &SessionToken, jar: CookieJar) -> Response {
    if state.sessions.remove(token) {
        warn!("Session expired upstream; token cleared");
    } else {
        info!("Stale session token cleared");
    }
    metrics::track_session_expired();
    metrics::set_active_sessions(state.sessions.len());

    (clear_token(jar, &state.session_config), Redirect::to(LOGIN_PATH)).into_response()
}
