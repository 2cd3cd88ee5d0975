use medadmin_access::GuardedPage;
use medadmin_client::ApiClient;
use medadmin_core::AppError;
use tracing::instrument;

use super::model::PageView;
use crate::middleware::session::Session;

pub struct PageService;

impl PageService {
    /// Fetches the page's upstream data and renders it for the session.
    #[instrument(skip(api, session, page), fields(page = page.path))]
    pub async fn render(
        api: &ApiClient,
        session: &Session,
        page: &GuardedPage,
        path: String,
        id: Option<&str>,
    ) -> Result<PageView, AppError> {
        let data = api
            .get_json(&session.token, &page.upstream_path(id))
            .await?;

        Ok(PageView::render(page, path, &session.directory, data))
    }
}
