use medadmin_access::{PermissionDirectory, VisibleSection, visible_navigation};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct NavLinkResponse {
    #[schema(example = "Doctors")]
    pub label: String,
    #[schema(example = "/doctors")]
    pub path: String,
    #[schema(example = "medical_services")]
    pub icon: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavSectionResponse {
    #[schema(example = "Registrations")]
    pub title: String,
    pub links: Vec<NavLinkResponse>,
}

impl From<VisibleSection> for NavSectionResponse {
    fn from(section: VisibleSection) -> Self {
        Self {
            title: section.title.to_string(),
            links: section
                .links
                .into_iter()
                .map(|link| NavLinkResponse {
                    label: link.label.to_string(),
                    path: link.path.to_string(),
                    icon: link.icon.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationResponse {
    /// Load status of the permission directory the menu was filtered with.
    #[schema(example = "ready")]
    pub permissions: String,
    pub sections: Vec<NavSectionResponse>,
}

impl NavigationResponse {
    pub fn for_directory(directory: &PermissionDirectory) -> Self {
        Self {
            permissions: directory.status().as_str().to_string(),
            sections: visible_navigation(directory)
                .into_iter()
                .map(NavSectionResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(example = "Dashboard")]
    pub title: String,
    pub navigation: NavigationResponse,
}

/// Query accepted by the dashboard. `from` is set when a guarded route
/// redirected here; the dashboard does not act on it.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DashboardQuery {
    pub from: Option<String>,
}
