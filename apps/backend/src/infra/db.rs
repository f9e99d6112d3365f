use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect to a database without running migrations.
pub async fn connect_db(
    kind: DbKind,
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let mut opts = match kind {
        DbKind::Postgres => {
            let url = db_url(profile, owner)?;
            ConnectOptions::new(url)
        }
        DbKind::SqliteMemory => {
            // One in-memory SQLite database per pool connection; cap the pool
            // at a single connection so every caller sees the same data.
            let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
            opts.max_connections(1);
            opts
        }
    };
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Single bootstrap entrypoint: connect and bring the schema up to date.
pub async fn bootstrap_db(
    kind: DbKind,
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind, profile, owner).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;
    info!(kind = ?kind, profile = ?profile, "database ready");
    Ok(conn)
}
