//! Session resolution: raw token in, verified identity out.
//!
//! The resolver is the only place the persistent store is consulted for a
//! request's identity, and it is consulted at most once. "Not logged in"
//! is always a value; only store-infrastructure failures propagate as
//! errors (and surface as 500s at the route boundary).

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::jwt::verify_access_token;
use crate::auth::roles::Role;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::users::{self, UserPublic};
use crate::state::app_state::AppState;

/// Bound on the user lookup so a stalled store cannot hang the request.
/// Hitting it is an infrastructure failure, not an authentication one.
pub const STORE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Store-backed public view of the authenticated user, recomputed per
/// request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
}

impl From<UserPublic> for Identity {
    fn from(user: UserPublic) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Why a request resolved as unauthenticated. The distinction exists for
/// logging only; every reason produces the same response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    /// No token in any channel
    NoCredential,
    /// Token present but failed signature/expiry/shape checks
    InvalidToken,
    /// Token valid but no matching active account
    UserNotFound,
}

/// Tri-state resolution outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Authenticated(Identity),
    Unauthenticated(UnauthenticatedReason),
}

/// Resolve a candidate token into an identity.
///
/// Exactly one store round-trip when the token verifies; none otherwise.
pub async fn resolve_session(
    state: &AppState,
    token: Option<&str>,
) -> Result<Session, AppError> {
    let Some(token) = token else {
        // An anonymous request is ordinary traffic, not an event worth logging.
        return Ok(Session::Unauthenticated(UnauthenticatedReason::NoCredential));
    };

    let claims = match verify_access_token(token, &state.security) {
        Ok(claims) => claims,
        Err(reason) => {
            debug!(%reason, "token rejected");
            return Ok(Session::Unauthenticated(UnauthenticatedReason::InvalidToken));
        }
    };

    let db = require_db(state)?;
    let lookup = users::find_active_public_by_id(db, claims.sub);
    let user = match tokio::time::timeout(STORE_LOOKUP_TIMEOUT, lookup).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(AppError::db_unavailable(format!(
                "user lookup timed out after {}s",
                STORE_LOOKUP_TIMEOUT.as_secs()
            )));
        }
    };

    match user {
        Some(user) => Ok(Session::Authenticated(Identity::from(user))),
        None => {
            // A verified token referencing no active account usually means
            // the account was removed or deactivated after issuance.
            warn!(sub = claims.sub, "valid token for missing or inactive user");
            Ok(Session::Unauthenticated(UnauthenticatedReason::UserNotFound))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};
    use time::OffsetDateTime;

    use super::{resolve_session, Session, UnauthenticatedReason};
    use crate::auth::jwt::mint_access_token;
    use crate::auth::roles::Role;
    use crate::entities::users;
    use crate::error::AppError;
    use crate::state::app_state::AppState;
    use crate::state::security_config::SecurityConfig;

    fn user_row(id: i64) -> users::Model {
        users::Model {
            id,
            name: "Sok Chan".to_string(),
            email: Some("sok.chan@example.com".to_string()),
            password_hash: Some("$argon2id$stub".to_string()),
            role: Role::Teacher,
            telegram_id: None,
            is_active: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn mint(sub: i64, security: &SecurityConfig) -> String {
        mint_access_token(sub, Role::Teacher, None, None, SystemTime::now(), security).unwrap()
    }

    #[tokio::test]
    async fn absent_token_skips_the_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let probe = db.clone();
        let state = AppState::for_tests(db);

        let session = resolve_session(&state, None).await.unwrap();
        assert_eq!(
            session,
            Session::Unauthenticated(UnauthenticatedReason::NoCredential)
        );
        assert!(probe.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn invalid_token_skips_the_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let probe = db.clone();
        let state = AppState::for_tests(db);

        let session = resolve_session(&state, Some("not.a.token")).await.unwrap();
        assert_eq!(
            session,
            Session::Unauthenticated(UnauthenticatedReason::InvalidToken)
        );
        assert!(probe.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn valid_token_with_active_user_authenticates() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(42)]])
            .into_connection();
        let probe = db.clone();
        let state = AppState::for_tests(db);
        let token = mint(42, &state.security);

        let session = resolve_session(&state, Some(&token)).await.unwrap();
        match session {
            Session::Authenticated(identity) => {
                assert_eq!(identity.id, 42);
                assert_eq!(identity.name, "Sok Chan");
                assert_eq!(identity.role, Role::Teacher);
            }
            other => panic!("expected Authenticated, got {other:?}"),
        }
        // Exactly one store round-trip.
        assert_eq!(probe.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn valid_token_without_user_is_unauthenticated() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();
        let state = AppState::for_tests(db);
        let token = mint(42, &state.security);

        let session = resolve_session(&state, Some(&token)).await.unwrap();
        assert_eq!(
            session,
            Session::Unauthenticated(UnauthenticatedReason::UserNotFound)
        );
    }

    #[tokio::test]
    async fn store_failure_is_an_error_not_unauthenticated() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
                "connection refused".to_string(),
            ))])
            .into_connection();
        let state = AppState::for_tests(db);
        let token = mint(42, &state.security);

        let result = resolve_session(&state, Some(&token)).await;
        assert!(matches!(result, Err(AppError::Db { .. })));
    }

    #[tokio::test]
    async fn missing_store_is_an_error() {
        let state = AppState::for_tests_without_db();
        let token = mint(42, &state.security);

        let result = resolve_session(&state, Some(&token)).await;
        assert!(matches!(result, Err(AppError::DbUnavailable { .. })));
    }
}
