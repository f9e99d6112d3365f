use clap::{Parser, ValueEnum};
use migration::sea_orm::Database;
use migration::MigrationCommand;

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Shade party database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: String,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,
}

/// Owner-level Postgres URL from environment variables. Migrations need DDL
/// rights, so this uses the owner credentials, not the app role.
fn owner_db_url(env: &Env) -> Result<String, String> {
    let var = |name: &str| {
        std::env::var(name).map_err(|_| format!("Required environment variable '{name}' is not set"))
    };

    let host = std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = match env {
        Env::Prod => var("PROD_DB")?,
        Env::Test => {
            let name = var("TEST_DB")?;
            if !name.ends_with("_test") {
                return Err(format!(
                    "Test environment requires database name ending with '_test', got '{name}'"
                ));
            }
            name
        }
    };
    let user = var("PARTY_OWNER_USER")?;
    let password = var("PARTY_OWNER_PASSWORD")?;

    Ok(format!(
        "postgresql://{user}:{password}@{host}:{port}/{db_name}"
    ))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command.as_str() {
        "up" => MigrationCommand::Up,
        "down" => MigrationCommand::Down,
        "fresh" => MigrationCommand::Fresh,
        "reset" => MigrationCommand::Reset,
        "refresh" => MigrationCommand::Refresh,
        "status" => MigrationCommand::Status,
        other => {
            eprintln!("Unknown command: {other}. Use: up | down | fresh | reset | refresh | status");
            std::process::exit(2);
        }
    };

    let url = match owner_db_url(&args.env) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
