pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm;
use sea_orm_migration::sea_orm::Statement;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250807_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250807_000001_init::Migration)]
    }
}

#[derive(Debug)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run a migration command against an already-connected database.
/// Used by both the CLI and the backend's bootstrap/test paths.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let backend = format!("{:?}", db.get_database_backend());
    tracing::info!("migration cmd={command:?} backend={backend}");

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            let applied = Migrator::get_applied_migrations(db)
                .await
                .map(|m| m.len())
                .unwrap_or(0);
            tracing::info!("migration cmd={command:?} ok, {applied} applied");
            Ok(())
        }
        Err(e) => {
            tracing::error!("migration cmd={command:?} failed: {e}");
            Err(e)
        }
    }
}

/// Name of the most recently applied migration, if any.
///
/// Reads the seaql migrations table directly so it works with a plain
/// connection (health checks), without constructing a migrator.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        "SELECT version FROM seaql_migrations ORDER BY applied_at DESC LIMIT 1".to_string(),
    );
    match db.query_one(stmt).await {
        Ok(Some(row)) => Ok(Some(row.try_get("", "version")?)),
        Ok(None) => Ok(None),
        // Table missing means no migrations have ever run
        Err(_) => Ok(None),
    }
}
