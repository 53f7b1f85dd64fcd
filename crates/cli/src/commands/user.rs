//! Account management commands.

use rolodex_server::config::ServerConfig;
use rolodex_server::db;
use rolodex_server::services::UserService;

use super::CliError;

/// Create an account with the same validation and hashing as the API.
///
/// # Errors
///
/// Returns `CliError` for configuration or connection failures, malformed
/// fields, or a taken username.
pub async fn create(username: &str, name: &str, password: &str) -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::MIGRATOR.run(&pool).await?;

    let users = UserService::new(&pool);
    let user = users.register(username, password, name).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Account created");
    Ok(())
}
