//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (unknown username or wrong password).
    ///
    /// One variant for both cases so the response cannot be used to
    /// enumerate usernames.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered.
    #[error("username already registered")]
    UsernameTaken,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
