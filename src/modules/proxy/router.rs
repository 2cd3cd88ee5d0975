use axum::{Router, routing::any};

use super::controller::forward;
use crate::state::AppState;

pub fn init_proxy_router() -> Router<AppState> {
    Router::new().route("/api/{*path}", any(forward))
}
