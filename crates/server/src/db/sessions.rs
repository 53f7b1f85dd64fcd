//! Session repository for database operations.
//!
//! Sessions are looked up by exact token match. Expiry is enforced by the
//! caller; this layer only stores and retrieves rows. A sweep of expired
//! rows is available for hygiene.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use rolodex_core::UserId;

use super::RepositoryError;
use crate::models::Session;

#[derive(sqlx::FromRow)]
struct SessionRow {
    token: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            token: row.token,
            user_id: UserId::new(row.user_id),
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a freshly minted session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the token already exists
    /// (practically unreachable with 256-bit random tokens).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, RepositoryError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r"
            INSERT INTO sessions (token, user_id, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING token, user_id, expires_at, created_at
            ",
        )
        .bind(token)
        .bind(user_id.as_i64())
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("session token already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Get a session by its token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r"
            SELECT token, user_id, expires_at, created_at
            FROM sessions
            WHERE token = ?
            ",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Session::from))
    }

    /// Delete a session by its token.
    ///
    /// # Returns
    ///
    /// Returns `true` if a session was deleted, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, token: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every session that expired at or before `now`.
    ///
    /// # Returns
    ///
    /// Returns the number of sessions removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
