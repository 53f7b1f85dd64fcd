//! Contact domain type.

use chrono::{DateTime, Utc};

use rolodex_core::{ContactId, Email, UserId};

/// A contact owned by exactly one user (domain type).
#[derive(Debug, Clone)]
pub struct Contact {
    /// Opaque unique ID.
    pub id: ContactId,
    /// Owning user.
    pub user_id: UserId,
    /// First name (required).
    pub first_name: String,
    /// Last name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<Email>,
    /// Phone number.
    pub phone: Option<String>,
    /// When the contact was created.
    pub created_at: DateTime<Utc>,
    /// When the contact was last updated.
    pub updated_at: DateTime<Utc>,
}
