//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (database ping)
//!
//! # Accounts
//! POST   /api/users               - Register
//! GET    /api/users/current       - Current account (auth)
//! PATCH  /api/users/current       - Partial profile update (auth)
//!
//! # Auth
//! POST   /api/auth/login          - Login, mints a session token
//! DELETE /api/auth/logout         - Logout, removes the presented session (auth)
//!
//! # Contacts (auth, owner-scoped)
//! POST   /api/contacts            - Create
//! GET    /api/contacts            - Filtered + paginated listing
//! GET    /api/contacts/{id}       - Fetch
//! PUT    /api/contacts/{id}       - Update
//! DELETE /api/contacts/{id}       - Delete (addresses cascade)
//!
//! # Addresses (auth, owner-scoped, nested)
//! POST   /api/contacts/{contactId}/addresses               - Create
//! GET    /api/contacts/{contactId}/addresses               - List
//! GET    /api/contacts/{contactId}/addresses/{addressId}   - Fetch
//! PUT    /api/contacts/{contactId}/addresses/{addressId}   - Update
//! DELETE /api/contacts/{contactId}/addresses/{addressId}   - Delete
//! ```
//!
//! Authentication is a fixed `X-API-TOKEN` header carrying the opaque
//! session token; every response wraps its payload in the envelope from
//! `crate::envelope`.

pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register))
        .route(
            "/users/current",
            get(users::current).patch(users::update_current),
        )
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", delete(auth::logout))
}

/// Create the contact routes router, including nested addresses.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", post(contacts::create).get(contacts::search))
        .route(
            "/contacts/{contactId}",
            get(contacts::get)
                .put(contacts::update)
                .delete(contacts::remove),
        )
        .route(
            "/contacts/{contactId}/addresses",
            post(addresses::create).get(addresses::list),
        )
        .route(
            "/contacts/{contactId}/addresses/{addressId}",
            get(addresses::get)
                .put(addresses::update)
                .delete(addresses::remove),
        )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .merge(user_routes())
        .merge(auth_routes())
        .merge(contact_routes());

    Router::new().nest("/api", api)
}
