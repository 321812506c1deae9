//! Shared fixtures for integration tests.
#![allow(dead_code)] // not every test binary uses every fixture

use std::time::SystemTime;

use backend::auth::jwt::mint_access_token;
use backend::auth::roles::Role;
use backend::entities::users;
use backend::state::security_config::SecurityConfig;
use time::OffsetDateTime;

pub const TEST_SECRET: &str = "integration-test-secret-do-not-reuse";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes())
}

pub fn mint(sub: i64, role: Role, security: &SecurityConfig) -> String {
    mint_access_token(sub, role, None, None, SystemTime::now(), security)
        .expect("test token should mint")
}

/// A plain active teacher account.
pub fn teacher_row(id: i64) -> users::Model {
    users::Model {
        id,
        name: "Sok Chan".to_string(),
        email: Some("sok.chan@example.com".to_string()),
        password_hash: None,
        role: Role::Teacher,
        telegram_id: None,
        is_active: true,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
