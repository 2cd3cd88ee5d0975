//! Reply shapes accepted from the marketplace API.
//!
//! The upstream is not consistent about envelopes, so each reply is accepted
//! either bare or nested under `data`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoginReply {
    Token { token: String },
    AccessToken { access_token: String },
    Wrapped { data: Box<LoginReply> },
}

impl LoginReply {
    fn into_token(self) -> String {
        match self {
            LoginReply::Token { token } => token,
            LoginReply::AccessToken { access_token } => access_token,
            LoginReply::Wrapped { data } => data.into_token(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PermissionEntry {
    Name(String),
    Named { name: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PermissionsReply {
    List(Vec<PermissionEntry>),
    Wrapped { data: Box<PermissionsReply> },
}

impl PermissionsReply {
    fn into_names(self) -> Vec<String> {
        match self {
            PermissionsReply::List(entries) => entries
                .into_iter()
                .map(|entry| match entry {
                    PermissionEntry::Name(name) | PermissionEntry::Named { name } => name,
                })
                .collect(),
            PermissionsReply::Wrapped { data } => data.into_names(),
        }
    }
}

/// Extracts the bearer token from a login reply.
pub fn parse_login(body: &[u8]) -> Result<String, ApiError> {
    let reply: LoginReply = serde_json::from_slice(body)
        .map_err(|e| ApiError::Decode(format!("login response: {}", e)))?;

    let token = reply.into_token();
    if token.trim().is_empty() {
        return Err(ApiError::Decode("login response: empty token".to_string()));
    }
    Ok(token)
}

/// Extracts the flat permission name list from a `role-permission` reply.
pub fn parse_permissions(body: &[u8]) -> Result<Vec<String>, ApiError> {
    serde_json::from_slice::<PermissionsReply>(body)
        .map(PermissionsReply::into_names)
        .map_err(|e| ApiError::Decode(format!("permission list: {}", e)))
}

/// Human-readable message from an error body: `message`, then `error`, then
/// the raw text.
pub fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_string))
    });

    from_json.unwrap_or_else(|| body.trim().to_string())
}
