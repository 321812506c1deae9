//! Credential extraction from a request's carrier channels.
//!
//! Pure request inspection, no store or network access. First match wins:
//! the `auth-token` cookie, then (outside production) the `dev-auth-token`
//! cookie, then an `Authorization: Bearer` header.

use actix_web::http::header;
use actix_web::HttpRequest;

use crate::auth::cookies::{AUTH_COOKIE, DEV_AUTH_COOKIE};
use crate::config::env::RuntimeEnv;

/// Produce the single candidate token for this request, if any.
/// Cookies cleared by logout carry an empty value and count as absent.
pub fn extract_token(req: &HttpRequest, env: RuntimeEnv) -> Option<String> {
    if let Some(cookie) = req.cookie(AUTH_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    if !env.is_production() {
        if let Some(cookie) = req.cookie(DEV_AUTH_COOKIE) {
            if !cookie.value().is_empty() {
                return Some(cookie.value().to_string());
            }
        }
    }

    bearer_token(req.headers().get(header::AUTHORIZATION))
}

/// Parse a "Bearer <token>" Authorization header value.
fn bearer_token(header_value: Option<&header::HeaderValue>) -> Option<String> {
    let auth_str = header_value?.to_str().ok()?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return None;
    }

    Some(parts[1].to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    use super::extract_token;
    use crate::config::env::RuntimeEnv;

    #[test]
    fn no_channels_means_no_token() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_token(&req, RuntimeEnv::Dev), None);
    }

    #[test]
    fn primary_cookie_wins_over_everything() {
        let req = TestRequest::default()
            .cookie(Cookie::new("auth-token", "from-cookie"))
            .cookie(Cookie::new("dev-auth-token", "from-dev-cookie"))
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();

        assert_eq!(
            extract_token(&req, RuntimeEnv::Dev),
            Some("from-cookie".to_string())
        );
    }

    #[test]
    fn dev_cookie_is_consulted_outside_production_only() {
        let req = TestRequest::default()
            .cookie(Cookie::new("dev-auth-token", "from-dev-cookie"))
            .to_http_request();

        assert_eq!(
            extract_token(&req, RuntimeEnv::Dev),
            Some("from-dev-cookie".to_string())
        );
        assert_eq!(extract_token(&req, RuntimeEnv::Test), Some("from-dev-cookie".to_string()));
        assert_eq!(extract_token(&req, RuntimeEnv::Prod), None);
    }

    #[test]
    fn bearer_header_is_the_last_resort() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();

        assert_eq!(
            extract_token(&req, RuntimeEnv::Prod),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn malformed_bearer_values_are_ignored() {
        for value in ["Token abc", "Bearer", "Bearer ", "Bearer a b"] {
            let req = TestRequest::default()
                .insert_header(("Authorization", value))
                .to_http_request();
            assert_eq!(extract_token(&req, RuntimeEnv::Dev), None, "value: {value}");
        }
    }

    #[test]
    fn cleared_cookie_counts_as_absent() {
        let req = TestRequest::default()
            .cookie(Cookie::new("auth-token", ""))
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();

        assert_eq!(
            extract_token(&req, RuntimeEnv::Dev),
            Some("from-header".to_string())
        );
    }
}
