//! Auth cookie construction.
//!
//! Two carriers for the same token: the canonical `auth-token` cookie,
//! and a readable `dev-auth-token` variant that exists only outside
//! production so browser tooling can inspect it.

use actix_web::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use crate::config::env::RuntimeEnv;

pub const AUTH_COOKIE: &str = "auth-token";
pub const DEV_AUTH_COOKIE: &str = "dev-auth-token";

/// Cookie lifetime, kept in lockstep with the token TTL.
pub const AUTH_COOKIE_MAX_AGE: Duration = Duration::days(30);

/// The canonical auth cookie. Secure only in production so plain-HTTP
/// local setups still receive it.
pub fn auth_cookie(token: &str, env: RuntimeEnv) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token.to_owned())
        .http_only(true)
        .secure(env.is_production())
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(AUTH_COOKIE_MAX_AGE)
        .finish()
}

/// The development fallback cookie. Never Secure, never httpOnly.
pub fn dev_auth_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(DEV_AUTH_COOKIE, token.to_owned())
        .http_only(false)
        .secure(false)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(AUTH_COOKIE_MAX_AGE)
        .finish()
}

/// An immediately-expired replacement used to clear a cookie on logout.
pub fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish()
}
