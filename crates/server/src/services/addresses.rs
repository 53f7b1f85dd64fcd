//! Address service: CRUD nested under an owned contact.
//!
//! Every operation resolves the parent contact through the ownership guard
//! first; only then is the address looked up within that contact. A failure
//! anywhere in the chain is the same not-found error.

use sqlx::SqlitePool;

use rolodex_core::{AddressId, ContactId};

use crate::db::addresses::NewAddress;
use crate::db::{AddressRepository, ContactRepository};
use crate::error::Result;
use crate::models::{Address, CurrentUser};
use crate::services::owned_or_not_found;
use crate::validation::ValidationErrors;

/// Address field values from a create or update request.
///
/// On update, `None` optional fields keep their stored value.
#[derive(Debug, Clone)]
pub struct AddressInput {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

/// Service for address CRUD scoped to a parent contact.
pub struct AddressService<'a> {
    contacts: ContactRepository<'a>,
    addresses: AddressRepository<'a>,
}

impl<'a> AddressService<'a> {
    /// Create a new address service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            contacts: ContactRepository::new(pool),
            addresses: AddressRepository::new(pool),
        }
    }

    /// Create an address under one of the caller's contacts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for malformed fields and the canonical
    /// not-found error when the contact is foreign or unknown.
    pub async fn create(
        &self,
        current: &CurrentUser,
        contact_id: &ContactId,
        input: AddressInput,
    ) -> Result<Address> {
        validate_address(&input)?;
        let contact = self.resolve_contact(current, contact_id).await?;

        let address = self
            .addresses
            .create(
                &contact,
                NewAddress {
                    street: input.street,
                    city: input.city,
                    province: input.province,
                    country: input.country,
                    postal_code: input.postal_code,
                },
            )
            .await?;

        Ok(address)
    }

    /// Fetch an address within one of the caller's contacts.
    ///
    /// # Errors
    ///
    /// Returns the canonical not-found error when the contact or the
    /// address cannot be resolved under the caller.
    pub async fn get(
        &self,
        current: &CurrentUser,
        contact_id: &ContactId,
        id: &AddressId,
    ) -> Result<Address> {
        let contact = self.resolve_contact(current, contact_id).await?;
        let found = self.addresses.find_in_contact(&contact, id).await?;
        owned_or_not_found(found, "Address")
    }

    /// List all addresses of one of the caller's contacts.
    ///
    /// # Errors
    ///
    /// Returns the canonical not-found error when the contact cannot be
    /// resolved under the caller.
    pub async fn list(
        &self,
        current: &CurrentUser,
        contact_id: &ContactId,
    ) -> Result<Vec<Address>> {
        let contact = self.resolve_contact(current, contact_id).await?;
        let addresses = self.addresses.list_for_contact(&contact).await?;
        Ok(addresses)
    }

    /// Update an address within one of the caller's contacts.
    ///
    /// The country is replaced; optional fields are replaced only when
    /// provided.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for malformed fields and the canonical
    /// not-found error for foreign or unknown ids.
    pub async fn update(
        &self,
        current: &CurrentUser,
        contact_id: &ContactId,
        id: &AddressId,
        input: AddressInput,
    ) -> Result<Address> {
        validate_address(&input)?;

        let mut address = self.get(current, contact_id, id).await?;
        address.country = input.country;
        if input.street.is_some() {
            address.street = input.street;
        }
        if input.city.is_some() {
            address.city = input.city;
        }
        if input.province.is_some() {
            address.province = input.province;
        }
        if input.postal_code.is_some() {
            address.postal_code = input.postal_code;
        }

        let updated = self.addresses.update(&address).await?;
        Ok(updated)
    }

    /// Delete an address within one of the caller's contacts.
    ///
    /// # Errors
    ///
    /// Returns the canonical not-found error when nothing was deleted.
    pub async fn delete(
        &self,
        current: &CurrentUser,
        contact_id: &ContactId,
        id: &AddressId,
    ) -> Result<()> {
        let contact = self.resolve_contact(current, contact_id).await?;
        let deleted = self.addresses.delete_in_contact(&contact, id).await?;
        owned_or_not_found(deleted.then_some(()), "Address")
    }

    async fn resolve_contact(
        &self,
        current: &CurrentUser,
        contact_id: &ContactId,
    ) -> Result<ContactId> {
        let found = self.contacts.find_owned(current.id, contact_id).await?;
        Ok(owned_or_not_found(found, "Contact")?.id)
    }
}

fn validate_address(input: &AddressInput) -> Result<()> {
    let mut violations = ValidationErrors::new();
    violations.optional_text("street", input.street.as_deref(), 200);
    violations.optional_text("city", input.city.as_deref(), 100);
    violations.optional_text("province", input.province.as_deref(), 100);
    violations.require_text("country", &input.country, 100);
    violations.optional_text("postalCode", input.postal_code.as_deref(), 10);
    violations.into_result()?;
    Ok(())
}
