//! User account service: registration and profile updates.

use sqlx::SqlitePool;

use rolodex_core::Username;

use crate::db::{RepositoryError, UserRepository};
use crate::error::Result;
use crate::models::{CurrentUser, User};
use crate::services::auth::{self, AuthError, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::validation::ValidationErrors;

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Service for account registration and profile management.
pub struct UserService<'a> {
    users: UserRepository<'a>,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// The password is stored only as an Argon2id hash.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if any field is malformed.
    /// Returns `AuthError::UsernameTaken` if the username already exists.
    pub async fn register(&self, username: &str, password: &str, name: &str) -> Result<User> {
        let username = validate_registration(username, password, name)?;
        let password_hash = auth::hash_password(password)?;

        let user = self
            .users
            .create(&username, &password_hash, name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Fetch the caller's account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the account row is missing or the
    /// query fails.
    pub async fn get_current(&self, current: &CurrentUser) -> Result<User> {
        let user = self
            .users
            .get_by_id(current.id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(user)
    }

    /// Apply a partial profile update to the caller's account.
    ///
    /// A new password goes through the same hashing step as registration;
    /// absent fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if a provided field is malformed.
    pub async fn update_profile(
        &self,
        current: &CurrentUser,
        update: ProfileUpdate,
    ) -> Result<User> {
        let mut violations = ValidationErrors::new();
        if let Some(name) = update.name.as_deref() {
            violations.require_text("name", name, 100);
        }
        if let Some(password) = update.password.as_deref() {
            validate_password(&mut violations, password);
        }
        violations.into_result()?;

        let password_hash = update
            .password
            .as_deref()
            .map(auth::hash_password)
            .transpose()?;

        let user = self
            .users
            .update_profile(current.id, update.name.as_deref(), password_hash.as_deref())
            .await?;

        Ok(user)
    }
}

fn validate_registration(username: &str, password: &str, name: &str) -> Result<Username> {
    let mut violations = ValidationErrors::new();

    let parsed = match Username::parse(username) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            violations.add("username", e.to_string());
            None
        }
    };
    validate_password(&mut violations, password);
    violations.require_text("name", name, 100);

    violations.into_result()?;

    // Unreachable fallback: parse failure always records a violation above
    parsed.ok_or_else(|| crate::error::AppError::Internal("username parse".to_owned()))
}

fn validate_password(violations: &mut ValidationErrors, password: &str) {
    if password.len() < MIN_PASSWORD_LENGTH {
        violations.add(
            "password",
            format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    } else if password.len() > MAX_PASSWORD_LENGTH {
        violations.add(
            "password",
            format!("must be at most {MAX_PASSWORD_LENGTH} characters"),
        );
    }
}
