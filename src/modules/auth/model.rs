use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

// Hand-written so the password never reaches the logs.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Where the console goes next.
    #[schema(example = "/dashboard")]
    pub redirect_to: String,
    /// Load status of the new session's permission directory.
    #[schema(example = "ready")]
    pub permissions: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginStatusResponse {
    pub authenticated: bool,
    #[schema(example = "/dashboard")]
    pub redirect_to: Option<String>,
}
