//! Shared domain types for Rolodex.
//!
//! This crate holds the validated value types used across the server and
//! CLI: newtype ids, the `Username` and `Email` types, and pagination
//! helpers. Keeping them here prevents handler code from passing raw
//! strings where a validated type is expected.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::email::{Email, EmailError};
pub use types::id::{AddressId, ContactId, UserId};
pub use types::page::{Page, PageRequest, Paging};
pub use types::username::{Username, UsernameError};
