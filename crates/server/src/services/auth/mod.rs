//! Authentication service.
//!
//! Handles login, logout, and session-token validation. Passwords are
//! hashed with Argon2id; session tokens are 256-bit random values encoded
//! as URL-safe base64 and stored in their own table with a fixed TTL.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::RngCore as _;
use sqlx::SqlitePool;

use rolodex_core::Username;

use crate::db::{SessionRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::models::{CurrentUser, Session};
use crate::validation::ValidationErrors;

/// Minimum password length.
pub(crate) const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (DoS guard; Argon2 input is unbounded otherwise).
pub(crate) const MAX_PASSWORD_LENGTH: usize = 100;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    sessions: SessionRepository<'a>,
    session_ttl: Duration,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, session_ttl: Duration) -> Self {
        Self {
            users: UserRepository::new(pool),
            sessions: SessionRepository::new(pool),
            session_ttl,
        }
    }

    /// Login with username and password, minting a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if either field is blank or oversized.
    /// Returns `AuthError::InvalidCredentials` when the username is unknown
    /// or the password does not match; the two cases are indistinguishable
    /// to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let username = validate_login_fields(username, password)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&username)
            .await
            .map_err(AuthError::Repository)?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = mint_token();
        let expires_at = Utc::now() + self.session_ttl;
        let session = self
            .sessions
            .create(&token, user.id, expires_at)
            .await
            .map_err(AuthError::Repository)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(session)
    }

    /// Resolve a presented token into the authenticated caller.
    ///
    /// Returns `None` for unknown or expired tokens; an expired session row
    /// is deleted on sight.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if a query fails.
    pub async fn authenticate(&self, token: &str) -> Result<Option<CurrentUser>> {
        let Some(session) = self.sessions.get(token).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            self.sessions.delete(token).await?;
            return Ok(None);
        }

        let Some(user) = self.users.get_by_id(session.user_id).await? else {
            // Session row outlived its user; treat as unauthenticated
            self.sessions.delete(token).await?;
            return Ok(None);
        };

        Ok(Some(CurrentUser {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            token: session.token,
        }))
    }

    /// Logout: remove the presented session.
    ///
    /// Other sessions of the same user stay valid.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the delete fails.
    pub async fn logout(&self, current: &CurrentUser) -> Result<()> {
        self.sessions.delete(&current.token).await?;
        tracing::info!(user_id = %current.id, "User logged out");
        Ok(())
    }
}

fn validate_login_fields(username: &str, password: &str) -> Result<Username> {
    let mut violations = ValidationErrors::new();
    violations.require_text("username", username, Username::MAX_LENGTH);
    violations.require_text("password", password, MAX_PASSWORD_LENGTH);
    violations.into_result()?;

    // A structurally invalid username cannot match any account; the login
    // error stays uniform instead of leaking which part failed.
    Username::parse(username).map_err(|_| AppError::Auth(AuthError::InvalidCredentials))
}

/// Mint a 256-bit random opaque token.
fn mint_token() -> String {
    let mut bytes = [0_u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a password using Argon2id.
pub(crate) fn hash_password(password: &str) -> std::result::Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
pub(crate) fn verify_password(
    password: &str,
    hash: &str,
) -> std::result::Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
