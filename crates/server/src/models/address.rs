//! Address domain type.

use chrono::{DateTime, Utc};

use rolodex_core::{AddressId, ContactId};

/// An address belonging to exactly one contact (domain type).
///
/// Only the country is required; street-level detail is whatever the user
/// chose to record.
#[derive(Debug, Clone)]
pub struct Address {
    /// Opaque unique ID.
    pub id: AddressId,
    /// Owning contact.
    pub contact_id: ContactId,
    /// Street line.
    pub street: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Province or state.
    pub province: Option<String>,
    /// Country (required).
    pub country: String,
    /// Postal code.
    pub postal_code: Option<String>,
    /// When the address was created.
    pub created_at: DateTime<Utc>,
    /// When the address was last updated.
    pub updated_at: DateTime<Utc>,
}
