//! Session maintenance commands.

use chrono::Utc;
use rolodex_server::config::ServerConfig;
use rolodex_server::db::{self, SessionRepository};

use super::CliError;

/// Remove every session whose expiry has passed.
///
/// Expired sessions are also deleted lazily when they are presented; this
/// sweep clears the rows that never come back.
///
/// # Errors
///
/// Returns `CliError` for configuration, connection, or query failures.
pub async fn sweep() -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let sessions = SessionRepository::new(&pool);
    let removed = sessions.delete_expired(Utc::now()).await?;

    tracing::info!(removed, "Expired sessions removed");
    Ok(())
}
