// Aliased so utoipa's axum_extras does not infer `Bytes` as a documented request body.
use axum::body::Bytes as RawBody;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri, header};
use axum::response::{IntoResponse, Response};
use medadmin_core::AppError;
use tracing::{debug, instrument};

use crate::middleware::session::Session;
use crate::state::AppState;

/// Forwards a call to the marketplace API with the session's bearer token.
///
/// The caller's body and `Content-Type` go upstream untouched (multipart for
/// most writes, JSON for subscription plans). The upstream status and body
/// come back verbatim, except a 401, which ends the session.
#[utoipa::path(
    get,
    path = "/api/{path}",
    params(("path" = String, Path, description = "Upstream endpoint path, e.g. `doctor/12`")),
    responses(
        (status = 200, description = "Upstream response, relayed as received"),
        (status = 303, description = "No session or session expired; redirected to /login"),
        (status = 502, description = "Marketplace API unreachable")
    ),
    security(("session_cookie" = [])),
    tag = "Proxy"
)]
#[instrument(skip(state, session, headers, body))]
pub async fn forward(
    State(state): State<AppState>,
    session: Session,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: RawBody,
) -> Result<Response, AppError> {
    let path = upstream_path(uri.path())
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("No such endpoint: {}", uri.path())))?;
    let target = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let upstream = state
        .api
        .send(
            &session.token,
            method,
            &target,
            headers.get(header::CONTENT_TYPE).cloned(),
            body,
        )
        .await?;
    debug!(status = %upstream.status, "Relayed upstream response");

    let mut response = (upstream.status, upstream.body).into_response();
    match upstream.content_type {
        Some(content_type) => {
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        None => {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
    }
    Ok(response)
}

/// The still-encoded path below `/api/`, or `None` when it could step outside
/// the upstream base URL.
///
/// Segments are checked both raw and as URL parsers read them, so `..`,
/// `%2e%2e` and `..%2F..` are all refused. The path is forwarded encoded, so
/// `%3F` stays part of the path instead of starting a query.
pub fn upstream_path(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/api/")?;
    if rest.is_empty() || rest.split('/').any(is_unsafe_segment) {
        return None;
    }
    Some(rest)
}

fn is_unsafe_segment(segment: &str) -> bool {
    let lowered = segment.to_ascii_lowercase();
    if lowered.contains("%2f") || lowered.contains("%5c") || lowered.contains('\\') {
        return true;
    }
    matches!(lowered.replace("%2e", ".").as_str(), "." | "..")
}
