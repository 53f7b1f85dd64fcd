//! Address repository for database operations.
//!
//! Addresses are always reached through their parent contact; the service
//! layer resolves contact ownership before any call lands here, so queries
//! scope by `contact_id` only.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use rolodex_core::{AddressId, ContactId};

use super::RepositoryError;
use crate::models::Address;

/// Field values for a new address (validated by the service layer).
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: String,
    contact_id: String,
    street: Option<String>,
    city: Option<String>,
    province: Option<String>,
    country: String,
    postal_code: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            contact_id: ContactId::new(row.contact_id),
            street: row.street,
            city: row.city,
            province: row.province,
            country: row.country,
            postal_code: row.postal_code,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new address under `contact_id`, minting a fresh opaque id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        contact_id: &ContactId,
        fields: NewAddress,
    ) -> Result<Address, RepositoryError> {
        let id = AddressId::generate();
        let now = Utc::now();

        let row = sqlx::query_as::<_, AddressRow>(
            r"
            INSERT INTO addresses (id, contact_id, street, city, province, country,
                                   postal_code, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, contact_id, street, city, province, country, postal_code,
                      created_at, updated_at
            ",
        )
        .bind(id.as_str())
        .bind(contact_id.as_str())
        .bind(fields.street.as_deref())
        .bind(fields.city.as_deref())
        .bind(fields.province.as_deref())
        .bind(&fields.country)
        .bind(fields.postal_code.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get an address only if it belongs to `contact_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_in_contact(
        &self,
        contact_id: &ContactId,
        id: &AddressId,
    ) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, contact_id, street, city, province, country, postal_code,
                   created_at, updated_at
            FROM addresses
            WHERE id = ? AND contact_id = ?
            ",
        )
        .bind(id.as_str())
        .bind(contact_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    /// List all addresses of a contact, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_contact(
        &self,
        contact_id: &ContactId,
    ) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, contact_id, street, city, province, country, postal_code,
                   created_at, updated_at
            FROM addresses
            WHERE contact_id = ?
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(contact_id.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    /// Persist the field values of an already-resolved address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address no longer exists
    /// under its contact.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, address: &Address) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            UPDATE addresses
            SET street = ?, city = ?, province = ?, country = ?, postal_code = ?,
                updated_at = ?
            WHERE id = ? AND contact_id = ?
            RETURNING id, contact_id, street, city, province, country, postal_code,
                      created_at, updated_at
            ",
        )
        .bind(address.street.as_deref())
        .bind(address.city.as_deref())
        .bind(address.province.as_deref())
        .bind(&address.country)
        .bind(address.postal_code.as_deref())
        .bind(Utc::now())
        .bind(address.id.as_str())
        .bind(address.contact_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Address::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete an address only if it belongs to `contact_id`.
    ///
    /// # Returns
    ///
    /// Returns `true` if the address was deleted, `false` if it didn't exist
    /// under this contact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_in_contact(
        &self,
        contact_id: &ContactId,
        id: &AddressId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ? AND contact_id = ?")
            .bind(id.as_str())
            .bind(contact_id.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
