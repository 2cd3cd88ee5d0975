use axum::Json;
use axum::extract::State;
use medadmin_core::AppError;
use tracing::instrument;

use super::model::PermissionsResponse;
use super::service::PermissionService;
use crate::middleware::session::Session;
use crate::state::AppState;

/// Current permission directory of the session
#[utoipa::path(
    get,
    path = "/session/permissions",
    responses(
        (status = 200, description = "Directory snapshot", body = PermissionsResponse),
        (status = 303, description = "No session; redirected to /login")
    ),
    security(("session_cookie" = [])),
    tag = "Session"
)]
pub async fn get_permissions(session: Session) -> Json<PermissionsResponse> {
    Json(session.directory.snapshot().into())
}

/// Re-fetch the session's permissions without logging in again
#[utoipa::path(
    post,
    path = "/session/permissions/refresh",
    responses(
        (status = 200, description = "Directory replaced (status `failed` if the fetch failed)", body = PermissionsResponse),
        (status = 303, description = "Session expired; redirected to /login")
    ),
    security(("session_cookie" = [])),
    tag = "Session"
)]
#[instrument(skip_all)]
pub async fn refresh_permissions(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<PermissionsResponse>, AppError> {
    match PermissionService::load(&state.api, &session.token, &session.directory).await {
        Err(err) if err.is_unauthenticated() => return Err(err.into()),
        _ => {}
    }

    Ok(Json(session.directory.snapshot().into()))
}
