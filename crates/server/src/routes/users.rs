//! Account route handlers: registration and profile.

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::envelope::WebResponse;
use crate::error::Result;
use crate::extract::Json;
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::UserService;
use crate::services::users::ProfileUpdate;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Partial profile update body; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Account payload returned by the user endpoints.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username.into_inner(),
            name: user.display_name,
        }
    }
}

/// Register a new account.
///
/// POST /api/users
///
/// # Errors
///
/// Returns 400 with field errors for malformed input or a taken username.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<WebResponse<&'static str>>> {
    let users = UserService::new(state.pool());
    users
        .register(&request.username, &request.password, &request.name)
        .await?;

    Ok(Json(WebResponse::ok("OK")))
}

/// Fetch the caller's account.
///
/// GET /api/users/current
///
/// # Errors
///
/// Returns 401 when unauthenticated.
pub async fn current(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<WebResponse<UserResponse>>> {
    let users = UserService::new(state.pool());
    let user = users.get_current(&caller).await?;

    Ok(Json(WebResponse::ok(user.into())))
}

/// Apply a partial update to the caller's account.
///
/// PATCH /api/users/current
///
/// # Errors
///
/// Returns 401 when unauthenticated, 400 for malformed fields.
pub async fn update_current(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<WebResponse<UserResponse>>> {
    let users = UserService::new(state.pool());
    let user = users
        .update_profile(
            &caller,
            ProfileUpdate {
                name: request.name,
                password: request.password,
            },
        )
        .await?;

    Ok(Json(WebResponse::ok(user.into())))
}
