//! User repository for database operations.
//!
//! Queries use sqlx's runtime API with typed row structs mapped into the
//! validated domain types from `rolodex-core`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use rolodex_core::{UserId, Username};

use super::RepositoryError;
use crate::models::User;

/// Row shape shared by the user queries.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    display_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let username = Username::parse(&self.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            username,
            display_name: self.display_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their login name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, display_name, created_at, updated_at
            FROM users
            WHERE username = ?
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, display_name, created_at, updated_at
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Create a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
        display_name: &str,
    ) -> Result<User, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, password_hash, display_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, display_name, created_at, updated_at
            ",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .bind(display_name)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_user()
    }

    /// Get a user together with their password hash by login name.
    ///
    /// Returns `None` if the user doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            #[sqlx(flatten)]
            user: UserRow,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, Row>(
            r"
            SELECT id, username, display_name, created_at, updated_at, password_hash
            FROM users
            WHERE username = ?
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let user = r.user.into_user()?;
        Ok(Some((user, r.password_hash)))
    }

    /// Apply a partial profile update; `None` fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: UserId,
        display_name: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET display_name = COALESCE(?, display_name),
                password_hash = COALESCE(?, password_hash),
                updated_at = ?
            WHERE id = ?
            RETURNING id, username, display_name, created_at, updated_at
            ",
        )
        .bind(display_name)
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_user()
    }
}
