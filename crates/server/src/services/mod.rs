//! Business logic services.
//!
//! Services validate input, enforce ownership, and orchestrate the
//! repositories. Handlers construct them per request from the shared pool.

pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod users;

pub use addresses::AddressService;
pub use auth::AuthService;
pub use contacts::ContactService;
pub use users::UserService;

use crate::error::AppError;

/// The single ownership guard: a resource that was not resolved under the
/// caller's scope becomes the canonical not-found error, whether it does
/// not exist or belongs to someone else.
pub(crate) fn owned_or_not_found<T>(found: Option<T>, resource: &str) -> Result<T, AppError> {
    found.ok_or_else(|| AppError::not_found(resource))
}
