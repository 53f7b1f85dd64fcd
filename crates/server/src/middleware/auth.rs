//! Authentication extractor.
//!
//! The session validator of the API: handlers that take `RequireAuth` only
//! run for requests whose `X-API-TOKEN` header resolves to a live session.
//! A missing header, an unknown token, and an expired token are one
//! user-visible category: 401 with a generic message.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::error::AppError;
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Fixed request header carrying the opaque session token.
pub const API_TOKEN_HEADER: &str = "X-API-TOKEN";

/// Extractor that requires an authenticated caller.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(current): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", current.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(API_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthorized)?;

        let auth = AuthService::new(state.pool(), state.config().session_ttl);
        let current = auth.authenticate(token).await?.ok_or_else(unauthorized)?;

        Ok(Self(current))
    }
}

fn unauthorized() -> AppError {
    AppError::Unauthorized("Unauthorized".to_owned())
}
