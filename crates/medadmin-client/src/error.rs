use medadmin_core::AppError;
use reqwest::StatusCode;

/// Failure of an upstream API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The bearer token was refused (HTTP 401 on an authenticated call).
    #[error("session expired")]
    Unauthenticated,

    /// Login credentials were refused.
    #[error("login rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// Any other non-2xx response.
    #[error("upstream returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }

    /// Upstream status attached to the failure, if there was a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthenticated => Some(StatusCode::UNAUTHORIZED),
            ApiError::Rejected { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(err) => err.status(),
            ApiError::Decode(_) => None,
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthenticated => AppError::session_expired(),
            ApiError::Rejected { message, .. } => AppError::unprocessable(anyhow::anyhow!(message)),
            other => AppError::bad_gateway(other),
        }
    }
}
