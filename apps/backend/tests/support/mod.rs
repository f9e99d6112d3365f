use backend::config::db::DbKind;
use backend::error::AppError;
use backend::infra::state::build_state;
use backend::state::app_state::AppState;

/// Build an AppState backed by a fresh in-memory SQLite database with the
/// full schema applied. Each call gets its own database, so tests are
/// isolated without sharing a transaction.
pub async fn build_test_state() -> Result<AppState, AppError> {
    backend_test_support::test_logging::init();
    build_state().with_db(DbKind::SqliteMemory).build().await
}
