//! Authentication routes: login, registration, session introspection,
//! logout. These are the producers and consumers of the signed token the
//! rest of the API authenticates with; the session endpoint is a thin
//! caller of the same extractor/resolver primitives the guard uses.

use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::cookies::{auth_cookie, dev_auth_cookie, expired_cookie, AUTH_COOKIE, DEV_AUTH_COOKIE};
use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::roles::Role;
use crate::auth::session::{resolve_session, Identity, Session};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::auth_token::extract_token;
use crate::logging::security;
use crate::repos::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: Identity,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Identity,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Attach the auth cookies for this environment to a response builder.
fn respond_with_token(
    state: &AppState,
    identity: Identity,
    token: String,
) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder.cookie(auth_cookie(&token, state.env));

    // The readable fallback cookie exists only outside production.
    if !state.env.is_production() {
        builder.cookie(dev_auth_cookie(&token));
    }

    builder.json(AuthResponse {
        user: identity,
        token,
    })
}

/// Password login. Unknown email, missing hash, and wrong password all
/// collapse into the same 401 so account existence stays unobservable;
/// a disabled account is the one deliberate exception (403).
async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request(
            "MISSING_CREDENTIALS",
            "Email and password are required".to_string(),
        ));
    }

    let db = require_db(&state)?;
    let user = users::find_by_email(db, req.email.trim()).await?;

    let Some(user) = user else {
        security::login_failed("unknown email", Some(&req.email));
        return Err(AppError::bad_credentials());
    };

    let Some(password_hash) = user.password_hash.as_deref() else {
        security::login_failed("account has no password", Some(&req.email));
        return Err(AppError::bad_credentials());
    };

    if !user.is_active {
        security::login_failed("account disabled", Some(&req.email));
        return Err(AppError::forbidden(
            "ACCOUNT_DISABLED",
            "Account is disabled".to_string(),
        ));
    }

    if !verify_password(password_hash, &req.password) {
        security::login_failed("wrong password", Some(&req.email));
        return Err(AppError::bad_credentials());
    }

    let token = mint_access_token(
        user.id,
        user.role,
        user.email.clone(),
        user.telegram_id,
        SystemTime::now(),
        &state.security,
    )?;

    let identity = Identity {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    };

    Ok(respond_with_token(&state, identity, token))
}

/// Self-registration. New accounts default to the teacher role and start
/// active; a duplicate email is a conflict, not a credential failure.
async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = req.name.trim();
    let email = req.email.trim();

    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request(
            "MISSING_FIELDS",
            "Name, email and password are required".to_string(),
        ));
    }

    let db = require_db(&state)?;

    if users::find_by_email(db, email).await?.is_some() {
        return Err(AppError::conflict(
            "EMAIL_TAKEN",
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let role = req.role.unwrap_or(Role::Teacher);
    let user = users::create_user(db, name, email, &password_hash, role).await?;

    let token = mint_access_token(
        user.id,
        user.role,
        user.email.clone(),
        user.telegram_id,
        SystemTime::now(),
        &state.security,
    )?;

    let identity = Identity {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    };

    Ok(respond_with_token(&state, identity, token))
}

/// Report the current session. Same resolution path as the guard; an
/// unauthenticated request gets the uniform 401 regardless of cause.
async fn session(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = extract_token(&req, state.env);

    match resolve_session(&state, token.as_deref()).await? {
        Session::Authenticated(identity) => {
            Ok(HttpResponse::Ok().json(SessionResponse { user: identity }))
        }
        Session::Unauthenticated(_) => Err(AppError::unauthorized()),
    }
}

/// Clear both auth cookies. Always succeeds, authenticated or not.
async fn logout() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .cookie(expired_cookie(AUTH_COOKIE))
        .cookie(expired_cookie(DEV_AUTH_COOKIE))
        .json(LogoutResponse {
            success: true,
            message: "Logged out successfully",
        }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/session").route(web::get().to(session)))
        .service(web::resource("/logout").route(web::post().to(logout)));
}
