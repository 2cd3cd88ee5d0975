use medadmin_config::UpstreamConfig;
use medadmin_core::SessionToken;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode, multipart};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::ApiError;
use crate::payload;

const LOGIN_ENDPOINT: &str = "login";
const PERMISSIONS_ENDPOINT: &str = "role-permission";

/// A response relayed from the upstream as-is.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Vec<u8>,
}

/// Client for the marketplace REST API.
///
/// Calls are never retried and carry no timeout of their own. Every
/// authenticated call that comes back 401 yields [`ApiError::Unauthenticated`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl ApiClient {
    pub fn new(config: UpstreamConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: UpstreamConfig) -> Self {
        Self { http, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Exchanges credentials for a bearer token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionToken, ApiError> {
        let form = multipart::Form::new()
            .text("email", email.to_string())
            .text("password", password.to_string());

        let response = self
            .http
            .post(self.config.endpoint(LOGIN_ENDPOINT))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = payload::error_message(&response.text().await.unwrap_or_default());
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
                    ApiError::Rejected { status, message }
                }
                _ => ApiError::Status { status, message },
            });
        }

        let body = response.bytes().await?;
        let token = payload::parse_login(&body)?;
        SessionToken::parse(&token)
            .ok_or_else(|| ApiError::Decode("login response: empty token".to_string()))
    }

    /// Fetches the session's flat permission list.
    #[instrument(skip_all)]
    pub async fn permissions(&self, token: &SessionToken) -> Result<Vec<String>, ApiError> {
        let response = self
            .authorized(Method::GET, PERMISSIONS_ENDPOINT, token)
            .send()
            .await?;
        let body = ensure_success(response).await?.bytes().await?;

        let names = payload::parse_permissions(&body)?;
        debug!(count = names.len(), "Fetched permission list");
        Ok(names)
    }

    /// GETs a JSON resource.
    #[instrument(skip(self, token))]
    pub async fn get_json(&self, token: &SessionToken, path: &str) -> Result<Value, ApiError> {
        let response = self.authorized(Method::GET, path, token).send().await?;
        let body = ensure_success(response).await?.bytes().await?;

        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(format!("{}: {}", path, e)))
    }

    /// Forwards an arbitrary call. Only a 401 is turned into an error; every
    /// other status is handed back verbatim.
    #[instrument(skip(self, token, content_type, body))]
    pub async fn send(
        &self,
        token: &SessionToken,
        method: Method,
        path_and_query: &str,
        content_type: Option<HeaderValue>,
        body: impl Into<reqwest::Body>,
    ) -> Result<UpstreamResponse, ApiError> {
        let mut request = self.authorized(method, path_and_query, token).body(body);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Upstream refused the session token");
            return Err(ApiError::Unauthenticated);
        }

        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await?.to_vec();
        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    fn authorized(&self, method: Method, path: &str, token: &SessionToken) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(path))
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        warn!("Upstream refused the session token");
        return Err(ApiError::Unauthenticated);
    }

    let message = payload::error_message(&response.text().await.unwrap_or_default());
    Err(ApiError::Status { status, message })
}
