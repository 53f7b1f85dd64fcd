//! CLI command implementations.

pub mod migrate;
pub mod session;
pub mod user;

use rolodex_server::config::ConfigError;
use rolodex_server::db::RepositoryError;
use rolodex_server::error::AppError;

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    App(#[from] AppError),
}
