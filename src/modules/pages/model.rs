use medadmin_access::{Affordance, GuardedPage, PageKind, PermissionDirectory, permitted_affordances};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    #[schema(example = "accept")]
    pub key: String,
    #[schema(example = "Accept")]
    pub label: String,
}

impl From<&Affordance> for ActionResponse {
    fn from(affordance: &Affordance) -> Self {
        Self {
            key: affordance.key.to_string(),
            label: affordance.label.to_string(),
        }
    }
}

/// A rendered page. `actions` lists only what the session may use.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageView {
    #[schema(example = "Doctors")]
    pub title: String,
    #[schema(example = "/doctors")]
    pub path: String,
    /// `list` or `detail`.
    #[schema(example = "list")]
    pub kind: String,
    /// Load status of the permission directory the page was rendered with.
    #[schema(example = "ready")]
    pub permissions: String,
    /// Upstream payload, relayed as received.
    #[schema(value_type = Object)]
    pub data: Value,
    pub actions: Vec<ActionResponse>,
}

impl PageView {
    pub fn render(
        page: &GuardedPage,
        path: String,
        directory: &PermissionDirectory,
        data: Value,
    ) -> Self {
        let kind = match page.kind {
            PageKind::List => "list",
            PageKind::Detail => "detail",
        };

        Self {
            title: page.title.to_string(),
            path,
            kind: kind.to_string(),
            permissions: directory.status().as_str().to_string(),
            data,
            actions: permitted_affordances(directory, page.affordances)
                .into_iter()
                .map(ActionResponse::from)
                .collect(),
        }
    }
}
