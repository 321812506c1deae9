#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::claims::Claims;
pub use auth::jwt::{mint_access_token, verify_access_token, TokenError};
pub use auth::roles::Role;
pub use auth::session::{resolve_session, Identity, Session, UnauthenticatedReason};
pub use config::db::{db_url, DbOwner, DbProfile};
pub use config::env::RuntimeEnv;
pub use error::AppError;
pub use extractors::auth_token::extract_token;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::auth_guard::AuthGuard;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Prelude for test convenience
pub mod prelude {
    pub use super::auth::cookies::*;
    pub use super::auth::jwt::*;
    pub use super::auth::roles::*;
    pub use super::auth::session::*;
    pub use super::config::db::*;
    pub use super::config::env::*;
    pub use super::error::*;
    pub use super::middleware::auth_guard::*;
    pub use super::state::app_state::*;
    pub use super::state::security_config::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
