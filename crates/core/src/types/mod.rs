//! Validated value types.

pub mod email;
pub mod id;
pub mod page;
pub mod username;
