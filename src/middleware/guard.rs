use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use medadmin_access::{RouteAccess, check_route};
use medadmin_core::Permission;
use medadmin_core::session::{DASHBOARD_PATH, LOGIN_PATH};
use tracing::debug;

use super::session::Session;
use crate::metrics;

/// Route guard. Renders the route only when the session holds `required`;
/// otherwise redirects to the dashboard, passing the attempted path and query
/// as `from`.
///
/// Used as a per-route layer:
///
/// ```ignore
/// Router::new()
///     .route("/doctors", get(list_doctors))
///     .route_layer(middleware::from_fn(move |req, next| {
///         require_permission(permissions::DOCTOR_READ, req, next)
///     }))
/// ```
pub async fn require_permission(required: Permission, req: Request, next: Next) -> Response {
    let access = match req.extensions().get::<Session>() {
        Some(session) => check_route(&session.directory, required),
        None => return Redirect::to(LOGIN_PATH).into_response(),
    };

    match access {
        RouteAccess::Allowed => next.run(req).await,
        RouteAccess::Denied(reason) => {
            let attempted = req
                .uri()
                .path_and_query()
                .map_or_else(|| req.uri().path(), |target| target.as_str());
            debug!(attempted, %reason, "Route denied");
            metrics::track_route_denied(&reason);
            Redirect::to(&denied_location(attempted)).into_response()
        }
    }
}

/// `/dashboard?from=<path and query>`
pub fn denied_location(attempted: &str) -> String {
    match serde_urlencoded::to_string([("from", attempted)]) {
        Ok(query) => format!("{}?{}", DASHBOARD_PATH, query),
        Err(_) => DASHBOARD_PATH.to_string(),
    }
}
