use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use medadmin_core::AppError;
use medadmin_core::session::{DASHBOARD_PATH, LOGIN_PATH};
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{LoginRequest, LoginResponse, LoginStatusResponse};
use super::service::AuthService;
use crate::middleware::session::expire_session;
use crate::modules::permissions::service::PermissionService;
use crate::session::{clear_token, get_token, set_token};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login entry point
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Whether a session cookie is already present", body = LoginStatusResponse)
    ),
    tag = "Authentication"
)]
pub async fn login_page(jar: CookieJar) -> Json<LoginStatusResponse> {
    let authenticated = get_token(&jar).is_some();
    Json(LoginStatusResponse {
        authenticated,
        redirect_to: authenticated.then(|| DASHBOARD_PATH.to_string()),
    })
}

/// Log in and open a console session
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; `token` cookie set", body = LoginResponse),
        (status = 400, description = "Bad request - malformed body", body = ErrorResponse),
        (status = 422, description = "Validation error or credentials rejected", body = ErrorResponse),
        (status = 502, description = "Marketplace API unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let (token, directory) = AuthService::login(&state.api, &state.sessions, &dto).await?;

    // Logging in over another account's cookie ends that session.
    if let Some(previous) = get_token(&jar).filter(|previous| *previous != token) {
        AuthService::logout(&state.sessions, &previous);
    }

    match PermissionService::load(&state.api, &token, &directory).await {
        Err(err) if err.is_unauthenticated() => return Ok(expire_session(&state, &token, jar)),
        _ => {}
    }

    let jar = set_token(jar, &token, &state.session_config);
    let body = LoginResponse {
        redirect_to: DASHBOARD_PATH.to_string(),
        permissions: directory.status().as_str().to_string(),
    };
    Ok((jar, Json(body)).into_response())
}

/// Log out and clear the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Cookie cleared; redirected to /login")
    ),
    tag = "Authentication"
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(token) = get_token(&jar) {
        AuthService::logout(&state.sessions, &token);
    }
    (clear_token(jar, &state.session_config), Redirect::to(LOGIN_PATH))
}
