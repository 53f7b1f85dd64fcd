//! Unified error handling.
//!
//! Provides a unified `AppError` type that renders into the response
//! envelope. All route handlers return `Result<T, AppError>`.
//!
//! Status taxonomy: validation and duplicate username map to 400, every
//! authentication failure to 401 with a generic message, not-found-or-not-
//! owned to 404, and anything unexpected to 500 with the detail kept out of
//! the response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::envelope::{ErrorBody, WebResponse};
use crate::services::auth::AuthError;
use crate::validation::ValidationErrors;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Request fields failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Request body or query string could not be deserialized.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (or not owned by the caller).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Canonical not-found error for an owner-scoped resource.
    ///
    /// Deliberately identical whether the id is unknown or owned by someone
    /// else.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound(format!("{resource} is not found"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server faults are logged with detail; the client sees a generic message
        if matches!(self, Self::Database(_) | Self::Internal(_))
            || matches!(
                self,
                Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash)
            )
        {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        let errors = match self {
            Self::Database(_) | Self::Internal(_) => {
                ErrorBody::Message("Internal server error".to_owned())
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => {
                    ErrorBody::Message("Username or password wrong".to_owned())
                }
                AuthError::UsernameTaken => {
                    ErrorBody::Message("Username already registered".to_owned())
                }
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    ErrorBody::Message("Internal server error".to_owned())
                }
            },
            Self::Validation(violations) => ErrorBody::Fields(violations),
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Unauthorized(msg) => {
                ErrorBody::Message(msg)
            }
        };

        (status, Json(WebResponse::error(errors))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
