//! Contact repository for database operations.
//!
//! Every read and write is scoped by the owning user id. `find_owned` is the
//! single ownership guard: an id that exists under a different owner is
//! indistinguishable from an id that does not exist.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use rolodex_core::{ContactId, Email, PageRequest, UserId};

use super::RepositoryError;
use crate::models::Contact;

/// Optional filters for the contact listing, AND-combined.
///
/// Each filter is a case-insensitive substring match; `name` matches the
/// first or the last name.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Field values for a new contact (validated by the service layer).
#[derive(Debug, Clone)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: String,
    user_id: i64,
    first_name: String,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_contact(self) -> Result<Contact, RepositoryError> {
        let email = self
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?;

        Ok(Contact {
            id: ContactId::new(self.id),
            user_id: UserId::new(self.user_id),
            first_name: self.first_name,
            last_name: self.last_name,
            email,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for contact database operations.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new contact under `user_id`, minting a fresh opaque id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        fields: NewContact,
    ) -> Result<Contact, RepositoryError> {
        let id = ContactId::generate();
        let now = Utc::now();

        let row = sqlx::query_as::<_, ContactRow>(
            r"
            INSERT INTO contacts (id, user_id, first_name, last_name, email, phone,
                                  created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, first_name, last_name, email, phone,
                      created_at, updated_at
            ",
        )
        .bind(id.as_str())
        .bind(user_id.as_i64())
        .bind(&fields.first_name)
        .bind(fields.last_name.as_deref())
        .bind(fields.email.as_ref().map(Email::as_str))
        .bind(fields.phone.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        row.into_contact()
    }

    /// Get a contact only if it belongs to `user_id`.
    ///
    /// A contact owned by someone else resolves to `None`, exactly like an
    /// unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_owned(
        &self,
        user_id: UserId,
        id: &ContactId,
    ) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, user_id, first_name, last_name, email, phone,
                   created_at, updated_at
            FROM contacts
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(id.as_str())
        .bind(user_id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(ContactRow::into_contact).transpose()
    }

    /// Persist the field values of an already-resolved owned contact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the contact no longer exists
    /// under its owner.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, contact: &Contact) -> Result<Contact, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            UPDATE contacts
            SET first_name = ?, last_name = ?, email = ?, phone = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, first_name, last_name, email, phone,
                      created_at, updated_at
            ",
        )
        .bind(&contact.first_name)
        .bind(contact.last_name.as_deref())
        .bind(contact.email.as_ref().map(Email::as_str))
        .bind(contact.phone.as_deref())
        .bind(Utc::now())
        .bind(contact.id.as_str())
        .bind(contact.user_id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_contact()
    }

    /// Delete a contact only if it belongs to `user_id`.
    ///
    /// Cascades to the contact's addresses.
    ///
    /// # Returns
    ///
    /// Returns `true` if the contact was deleted, `false` if it didn't exist
    /// under this owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_owned(
        &self,
        user_id: UserId,
        id: &ContactId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ? AND user_id = ?")
            .bind(id.as_str())
            .bind(user_id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Filtered, paginated listing of a user's contacts.
    ///
    /// Returns the requested page plus the total row count for the filter,
    /// ordered by creation time for stable pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn search(
        &self,
        user_id: UserId,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<(Vec<Contact>, u64), RepositoryError> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM contacts");
        push_filters(&mut count, user_id, filter);
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        let mut query = QueryBuilder::new(
            "SELECT id, user_id, first_name, last_name, email, phone, \
             created_at, updated_at FROM contacts",
        );
        push_filters(&mut query, user_id, filter);
        query
            .push(" ORDER BY created_at ASC, id ASC LIMIT ")
            .push_bind(i64::from(page.size()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows: Vec<ContactRow> = query.build_query_as().fetch_all(self.pool).await?;

        let contacts = rows
            .into_iter()
            .map(ContactRow::into_contact)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((contacts, u64::try_from(total).unwrap_or(0)))
    }
}

/// Append the owner scope and the optional filters to a query.
fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, user_id: UserId, filter: &ContactFilter) {
    query.push(" WHERE user_id = ").push_bind(user_id.as_i64());

    if let Some(name) = &filter.name {
        let pattern = like_pattern(name);
        query
            .push(" AND (first_name LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR last_name LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }

    if let Some(email) = &filter.email {
        query
            .push(" AND email LIKE ")
            .push_bind(like_pattern(email))
            .push(" ESCAPE '\\'");
    }

    if let Some(phone) = &filter.phone {
        query
            .push(" AND phone LIKE ")
            .push_bind(like_pattern(phone))
            .push(" ESCAPE '\\'");
    }
}

/// Build a `%term%` pattern with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
