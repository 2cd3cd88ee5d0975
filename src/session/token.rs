//! The session token cookie.
//!
//! The cookie is the only client-side state the console keeps. It carries no
//! expiry: the upstream decides when a token is dead, and a 401 from it clears
//! the cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use medadmin_config::SessionConfig;
use medadmin_core::SessionToken;
use medadmin_core::session::TOKEN_COOKIE;

fn token_cookie(value: String, config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .build();

    if let Some(domain) = &config.cookie_domain {
        cookie.set_domain(domain.clone());
    }
    cookie
}

pub fn set_token(jar: CookieJar, token: &SessionToken, config: &SessionConfig) -> CookieJar {
    jar.add(token_cookie(token.as_str().to_string(), config))
}

/// The stored token, or `None` when logged out.
pub fn get_token(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(TOKEN_COOKIE)
        .and_then(|cookie| SessionToken::parse(cookie.value()))
}

/// Instructs the browser to drop the cookie, whether or not it sent one.
pub fn clear_token(jar: CookieJar, config: &SessionConfig) -> CookieJar {
    let mut cookie = token_cookie(String::new(), config);
    cookie.make_removal();
    jar.add(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};
    use axum::response::IntoResponse;

    fn set_cookie_header(jar: CookieJar) -> String {
        let response = (jar, "").into_response();
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_set_token_cookie_attributes() {
        let token = SessionToken::parse("tok-1").unwrap();
        let header = set_cookie_header(set_token(
            CookieJar::new(),
            &token,
            &SessionConfig::default(),
        ));

        assert!(header.starts_with("token=tok-1"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Path=/"));
        assert!(!header.contains("Max-Age"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn test_cookie_domain_and_secure_from_config() {
        let config = SessionConfig {
            cookie_domain: Some("admin.example.com".to_string()),
            secure: true,
            ..SessionConfig::default()
        };
        let token = SessionToken::parse("tok-1").unwrap();
        let header = set_cookie_header(set_token(CookieJar::new(), &token, &config));

        assert!(header.contains("Domain=admin.example.com"));
        assert!(header.contains("Secure"));
    }

    #[test]
    fn test_get_token_reads_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; token=abc"));
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(get_token(&jar).unwrap().as_str(), "abc");
    }

    #[test]
    fn test_empty_cookie_means_logged_out() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        let jar = CookieJar::from_headers(&headers);

        assert!(get_token(&jar).is_none());
        assert!(get_token(&CookieJar::new()).is_none());
    }

    #[test]
    fn test_clear_token_expires_cookie() {
        let header = set_cookie_header(clear_token(CookieJar::new(), &SessionConfig::default()));

        assert!(header.starts_with("token="));
        assert!(header.contains("Max-Age=0"));
    }
}
