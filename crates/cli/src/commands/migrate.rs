//! Database migration command.
//!
//! Applies the migrations embedded in `rolodex-server` to the database
//! named by `ROLODEX_DATABASE_URL`.

use rolodex_server::config::ServerConfig;
use rolodex_server::db;

use super::CliError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CliError` if configuration, connection, or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
