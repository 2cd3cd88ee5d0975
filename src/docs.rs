use medadmin_core::session::TOKEN_COOKIE;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, LoginStatusResponse};
use crate::modules::navigation::model::{
    DashboardResponse, NavLinkResponse, NavSectionResponse, NavigationResponse,
};
use crate::modules::pages::model::{ActionResponse, PageView};
use crate::modules::permissions::model::PermissionsResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_page,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::navigation::controller::dashboard,
        crate::modules::navigation::controller::navigation,
        crate::modules::permissions::controller::get_permissions,
        crate::modules::permissions::controller::refresh_permissions,
        crate::modules::proxy::controller::forward,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            LoginStatusResponse,
            ErrorResponse,
            DashboardResponse,
            NavigationResponse,
            NavSectionResponse,
            NavLinkResponse,
            PermissionsResponse,
            PageView,
            ActionResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Console login and logout"),
        (name = "Console", description = "Dashboard and permission-filtered navigation"),
        (name = "Session", description = "The session's permission directory"),
        (name = "Proxy", description = "Authenticated pass-through to the marketplace API")
    ),
    info(
        title = "MedAdmin Console",
        version = "0.1.0",
        description = "Back-office gateway for the medical marketplace. Guarded pages (e.g. `GET /doctors`, `GET /doctors/{id}`) render a `PageView` when the session holds the page's permission and redirect to `/dashboard?from=<path>` otherwise.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(TOKEN_COOKIE))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_console_routes() {
        let doc = ApiDoc::openapi();

        for path in ["/login", "/logout", "/dashboard", "/navigation", "/session/permissions"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
