//! Rolodex server library.
//!
//! Exposes the server as a library so the router can be built inside
//! integration tests and the CLI can reuse the database layer.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
