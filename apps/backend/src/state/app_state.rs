use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::env::RuntimeEnv;

/// Application state containing shared, read-only resources.
///
/// Constructed once at startup by the `StateBuilder` and handed to the
/// HTTP server; the store client is injected here rather than reached
/// through any module-level global.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Runtime environment (gates development-only relaxations)
    pub env: RuntimeEnv,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, env: RuntimeEnv) -> Self {
        Self {
            db: Some(db),
            security,
            env,
        }
    }

    /// Create an AppState without a database connection (for testing)
    pub fn without_db(security: SecurityConfig, env: RuntimeEnv) -> Self {
        Self {
            db: None,
            security,
            env,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// Test state backed by the given connection, non-production env.
    #[cfg(test)]
    pub fn for_tests(db: DatabaseConnection) -> Self {
        Self::new(db, SecurityConfig::default(), RuntimeEnv::Test)
    }

    /// Test state without a database connection
    #[cfg(test)]
    pub fn for_tests_without_db() -> Self {
        Self::without_db(SecurityConfig::default(), RuntimeEnv::Test)
    }
}
