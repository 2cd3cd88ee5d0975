use chrono::{DateTime, Utc};
use medadmin_access::DirectorySnapshot;
use serde::Serialize;
use utoipa::ToSchema;

/// The session's permission directory at a point in time.
#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionsResponse {
    /// `pending`, `loading`, `ready` or `failed`.
    #[schema(example = "ready")]
    pub status: String,
    #[schema(example = json!(["doctor-read", "doctor-view"]))]
    pub permissions: Vec<String>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl From<DirectorySnapshot> for PermissionsResponse {
    fn from(snapshot: DirectorySnapshot) -> Self {
        Self {
            status: snapshot.status.as_str().to_string(),
            permissions: snapshot
                .permissions
                .iter()
                .map(ToString::to_string)
                .collect(),
            loaded_at: snapshot.loaded_at,
        }
    }
}
