use medadmin_access::PermissionDirectory;
use medadmin_client::{ApiClient, ApiError};
use medadmin_core::SessionToken;
use tracing::{info, instrument};

use crate::metrics;

pub struct PermissionService;

impl PermissionService {
    /// Fetches the session's permission list and replaces the directory's set.
    ///
    /// A failed fetch leaves the directory empty; the error is returned so the
    /// caller can treat a 401 as an expired session.
    #[instrument(skip_all)]
    pub async fn load(
        api: &ApiClient,
        token: &SessionToken,
        directory: &PermissionDirectory,
    ) -> Result<usize, ApiError> {
        let result = directory.load(api.permissions(token)).await;
        metrics::track_permission_load(directory.status());

        if let Ok(count) = result {
            info!(count, "Permissions loaded");
        }
        result
    }
}
