//! User domain type.

use chrono::{DateTime, Utc};

use rolodex_core::{UserId, Username};

/// A registered account (domain type).
///
/// The password hash is deliberately not part of this type; the repository
/// only surfaces it on the login path.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// Human-readable display name.
    pub display_name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
