//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ROLODEX_DATABASE_URL` - `SQLite` connection string
//!   (e.g. `sqlite://rolodex.db`); falls back to `DATABASE_URL`
//!
//! ## Optional
//! - `ROLODEX_HOST` - Bind address (default: 127.0.0.1)
//! - `ROLODEX_PORT` - Listen port (default: 3000)
//! - `ROLODEX_SESSION_TTL_HOURS` - Session lifetime in hours (default: 720,
//!   i.e. 30 days)

use std::net::{IpAddr, SocketAddr};

use chrono::Duration;
use secrecy::SecretString;
use thiserror::Error;

/// Default session lifetime in hours (30 days).
const DEFAULT_SESSION_TTL_HOURS: i64 = 30 * 24;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` database connection URL (may embed credentials)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// How long a login session stays valid
    pub session_ttl: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ROLODEX_DATABASE_URL")?;
        let host = get_env_or_default("ROLODEX_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ROLODEX_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ROLODEX_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ROLODEX_PORT".to_string(), e.to_string()))?;
        let ttl_hours = get_env_or_default(
            "ROLODEX_SESSION_TTL_HOURS",
            &DEFAULT_SESSION_TTL_HOURS.to_string(),
        )
        .parse::<i64>()
        .ok()
        .filter(|h| *h > 0)
        .ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "ROLODEX_SESSION_TTL_HOURS".to_string(),
                "must be a positive integer".to_string(),
            )
        })?;

        Ok(Self {
            database_url,
            host,
            port,
            session_ttl: Duration::hours(ttl_hours),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
