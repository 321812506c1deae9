use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Centralized helper to access the database connection from AppState.
///
/// The canonical way to reach the store from application code: a borrowed
/// reference when configured, `AppError::DbUnavailable` otherwise.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db()
        .ok_or_else(|| AppError::db_unavailable("database connection not configured".to_string()))
}
