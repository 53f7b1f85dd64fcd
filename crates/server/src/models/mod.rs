//! Domain models for the server.
//!
//! These are validated domain objects, separate from the database row types
//! in `db/` and the wire DTOs in `routes/`.

pub mod address;
pub mod contact;
pub mod session;
pub mod user;

pub use address::Address;
pub use contact::Contact;
pub use session::{CurrentUser, Session};
pub use user::User;
