//! Contact service: owner-scoped CRUD plus the filtered listing.

use sqlx::SqlitePool;

use rolodex_core::{ContactId, Email, Page, PageRequest};

use crate::db::contacts::{ContactFilter, NewContact};
use crate::db::ContactRepository;
use crate::error::Result;
use crate::models::{Contact, CurrentUser};
use crate::services::owned_or_not_found;
use crate::validation::ValidationErrors;

/// Contact field values from a create or update request.
///
/// On update, `None` optional fields keep their stored value.
#[derive(Debug, Clone)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Service for contact CRUD and search.
pub struct ContactService<'a> {
    contacts: ContactRepository<'a>,
}

impl<'a> ContactService<'a> {
    /// Create a new contact service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            contacts: ContactRepository::new(pool),
        }
    }

    /// Create a contact owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if any field is malformed.
    pub async fn create(&self, current: &CurrentUser, input: ContactInput) -> Result<Contact> {
        let email = validate_contact(&input)?;

        let contact = self
            .contacts
            .create(
                current.id,
                NewContact {
                    first_name: input.first_name,
                    last_name: input.last_name,
                    email,
                    phone: input.phone,
                },
            )
            .await?;

        Ok(contact)
    }

    /// Fetch one of the caller's contacts.
    ///
    /// # Errors
    ///
    /// Returns the canonical not-found error when the id is unknown or
    /// owned by another user.
    pub async fn get(&self, current: &CurrentUser, id: &ContactId) -> Result<Contact> {
        let found = self.contacts.find_owned(current.id, id).await?;
        owned_or_not_found(found, "Contact")
    }

    /// Update one of the caller's contacts.
    ///
    /// The first name is replaced; optional fields are replaced only when
    /// provided.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for malformed fields and the canonical
    /// not-found error for foreign or unknown ids.
    pub async fn update(
        &self,
        current: &CurrentUser,
        id: &ContactId,
        input: ContactInput,
    ) -> Result<Contact> {
        let email = validate_contact(&input)?;

        let mut contact = self.get(current, id).await?;
        contact.first_name = input.first_name;
        if input.last_name.is_some() {
            contact.last_name = input.last_name;
        }
        if email.is_some() {
            contact.email = email;
        }
        if input.phone.is_some() {
            contact.phone = input.phone;
        }

        let updated = self.contacts.update(&contact).await?;
        Ok(updated)
    }

    /// Delete one of the caller's contacts (addresses cascade).
    ///
    /// # Errors
    ///
    /// Returns the canonical not-found error when nothing was deleted.
    pub async fn delete(&self, current: &CurrentUser, id: &ContactId) -> Result<()> {
        let deleted = self.contacts.delete_owned(current.id, id).await?;
        owned_or_not_found(deleted.then_some(()), "Contact")
    }

    /// Filtered, paginated listing of the caller's contacts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if a query fails.
    pub async fn search(
        &self,
        current: &CurrentUser,
        filter: ContactFilter,
        page: PageRequest,
    ) -> Result<Page<Contact>> {
        let (items, total) = self.contacts.search(current.id, &filter, page).await?;

        Ok(Page {
            items,
            paging: page.paging(total),
        })
    }
}

fn validate_contact(input: &ContactInput) -> Result<Option<Email>> {
    let mut violations = ValidationErrors::new();
    violations.require_text("firstName", &input.first_name, 100);
    violations.optional_text("lastName", input.last_name.as_deref(), 100);
    violations.optional_text("phone", input.phone.as_deref(), 20);

    let email = match input.email.as_deref() {
        Some(raw) => match Email::parse(raw) {
            Ok(email) => Some(email),
            Err(e) => {
                violations.add("email", e.to_string());
                None
            }
        },
        None => None,
    };

    violations.into_result()?;
    Ok(email)
}
