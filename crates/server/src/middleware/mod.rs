//! HTTP middleware and extractors.

pub mod auth;

pub use auth::{API_TOKEN_HEADER, RequireAuth};
