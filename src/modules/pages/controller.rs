use axum::Json;
use axum::extract::{OriginalUri, Path, State};
use medadmin_access::GuardedPage;
use medadmin_access::pages::is_valid_id;
use medadmin_core::AppError;

use super::model::PageView;
use super::service::PageService;
use crate::middleware::session::Session;
use crate::state::AppState;

pub async fn list_page(
    page: &'static GuardedPage,
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<PageView>, AppError> {
    let view = PageService::render(&state.api, &session, page, page.path.to_string(), None).await?;
    Ok(Json(view))
}

pub async fn detail_page(
    page: &'static GuardedPage,
    State(state): State<AppState>,
    session: Session,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<Json<PageView>, AppError> {
    if !is_valid_id(&id) {
        return Err(AppError::not_found(anyhow::anyhow!("No such record: {}", id)));
    }

    let view = PageService::render(
        &state.api,
        &session,
        page,
        uri.path().to_string(),
        Some(&id),
    )
    .await?;
    Ok(Json(view))
}
