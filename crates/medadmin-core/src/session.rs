//! The bearer token that identifies a console session, and the paths the
//! session and access flows redirect to.

use std::fmt;

/// Name of the cookie holding the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Login entry point. Expired or missing sessions land here.
pub const LOGIN_PATH: &str = "/login";

/// Landing page. Denied routes land here.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Opaque bearer credential issued by the upstream API.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a stored token. Empty or blank values mean "logged out".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_tokens_are_absent() {
        assert!(SessionToken::parse("").is_none());
        assert!(SessionToken::parse("   ").is_none());
    }

    #[test]
    fn test_token_is_trimmed() {
        let token = SessionToken::parse(" abc ").unwrap();
        assert_eq!(token.as_str(), "abc");
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = SessionToken::parse("secret-token").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret-token"));
    }
}
