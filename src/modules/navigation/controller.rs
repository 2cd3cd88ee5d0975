use axum::Json;
use axum::extract::Query;
use tracing::debug;

use super::model::{DashboardQuery, DashboardResponse, NavigationResponse};
use crate::middleware::session::Session;

/// Console landing page
#[utoipa::path(
    get,
    path = "/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard with the session's navigation", body = DashboardResponse),
        (status = 303, description = "No session; redirected to /login")
    ),
    security(("session_cookie" = [])),
    tag = "Console"
)]
pub async fn dashboard(session: Session, Query(query): Query<DashboardQuery>) -> Json<DashboardResponse> {
    if let Some(from) = &query.from {
        debug!(from, "Arrived from a denied route");
    }

    Json(DashboardResponse {
        title: "Dashboard".to_string(),
        navigation: NavigationResponse::for_directory(&session.directory),
    })
}

/// Sidebar sections the session may see
#[utoipa::path(
    get,
    path = "/navigation",
    responses(
        (status = 200, description = "Visible navigation sections", body = NavigationResponse),
        (status = 303, description = "No session; redirected to /login")
    ),
    security(("session_cookie" = [])),
    tag = "Console"
)]
pub async fn navigation(session: Session) -> Json<NavigationResponse> {
    Json(NavigationResponse::for_directory(&session.directory))
}
