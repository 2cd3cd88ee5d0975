use axum::{
    Router,
    extract::{OriginalUri, Path, Request, State},
    middleware::{self, Next},
    routing::{MethodRouter, get},
};
use medadmin_access::{GuardedPage, PAGES, PageKind};

use super::controller::{detail_page, list_page};
use crate::middleware::guard::require_permission;
use crate::middleware::session::Session;
use crate::state::AppState;

/// One guarded route per catalogue entry.
pub fn init_pages_router() -> Router<AppState> {
    PAGES
        .iter()
        .fold(Router::new(), |router, page| router.merge(page_router(page)))
}

fn page_router(page: &'static GuardedPage) -> Router<AppState> {
    let handler: MethodRouter<AppState> = match page.kind {
        PageKind::List => get(move |state: State<AppState>, session: Session| {
            list_page(page, state, session)
        }),
        PageKind::Detail => get(
            move |state: State<AppState>, session: Session, uri: OriginalUri, id: Path<String>| {
                detail_page(page, state, session, uri, id)
            },
        ),
    };

    let required = page.required;
    Router::new()
        .route(page.path, handler)
        .route_layer(middleware::from_fn(move |req: Request, next: Next| {
            require_permission(required, req, next)
        }))
}
