//! Auth route handlers: login and logout.

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::envelope::WebResponse;
use crate::error::Result;
use crate::extract::Json;
use crate::middleware::RequireAuth;
use crate::models::Session;
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Minted session returned on login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Opaque token for the `X-API-TOKEN` header.
    pub token: String,
    /// Expiry as epoch milliseconds.
    pub expired_at: i64,
}

impl From<Session> for TokenResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            expired_at: session.expires_at.timestamp_millis(),
        }
    }
}

/// Login with username and password.
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns 401 with one uniform message for an unknown username or a wrong
/// password, 400 for blank fields.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<WebResponse<TokenResponse>>> {
    let auth = AuthService::new(state.pool(), state.config().session_ttl);
    let session = auth.login(&request.username, &request.password).await?;

    Ok(Json(WebResponse::ok(session.into())))
}

/// Logout, removing the presented session.
///
/// DELETE /api/auth/logout
///
/// # Errors
///
/// Returns 401 when unauthenticated.
pub async fn logout(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<WebResponse<&'static str>>> {
    let auth = AuthService::new(state.pool(), state.config().session_ttl);
    auth.logout(&caller).await?;

    Ok(Json(WebResponse::ok("OK")))
}
