use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_permissions, refresh_permissions};
use crate::state::AppState;

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/session/permissions", get(get_permissions))
        .route("/session/permissions/refresh", post(refresh_permissions))
}
