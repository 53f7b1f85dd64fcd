//! Address route handlers, nested under a parent contact.

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use rolodex_core::{AddressId, ContactId};

use crate::envelope::WebResponse;
use crate::error::Result;
use crate::extract::Json;
use crate::middleware::RequireAuth;
use crate::models::Address;
use crate::services::AddressService;
use crate::services::addresses::AddressInput;
use crate::state::AppState;

/// Address create/update request body.
///
/// On update, absent optional fields keep their stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

impl From<AddressRequest> for AddressInput {
    fn from(request: AddressRequest) -> Self {
        Self {
            street: request.street,
            city: request.city,
            province: request.province,
            country: request.country,
            postal_code: request.postal_code,
        }
    }
}

/// Address payload returned by the address endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.into_inner(),
            street: address.street,
            city: address.city,
            province: address.province,
            country: address.country,
            postal_code: address.postal_code,
        }
    }
}

/// Create an address under a contact.
///
/// POST /api/contacts/{contactId}/addresses
///
/// # Errors
///
/// Returns 404 when the contact is unknown or foreign, 400 for malformed
/// fields.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(contact_id): Path<String>,
    Json(request): Json<AddressRequest>,
) -> Result<Json<WebResponse<AddressResponse>>> {
    let addresses = AddressService::new(state.pool());
    let address = addresses
        .create(&caller, &ContactId::new(contact_id), request.into())
        .await?;

    Ok(Json(WebResponse::ok(address.into())))
}

/// List all addresses of a contact.
///
/// GET /api/contacts/{contactId}/addresses
///
/// # Errors
///
/// Returns 404 when the contact is unknown or foreign.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(contact_id): Path<String>,
) -> Result<Json<WebResponse<Vec<AddressResponse>>>> {
    let addresses = AddressService::new(state.pool());
    let found = addresses.list(&caller, &ContactId::new(contact_id)).await?;

    Ok(Json(WebResponse::ok(
        found.into_iter().map(Into::into).collect(),
    )))
}

/// Fetch one address of a contact.
///
/// GET /api/contacts/{contactId}/addresses/{addressId}
///
/// # Errors
///
/// Returns 404 when the contact or the address cannot be resolved under the
/// caller.
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> Result<Json<WebResponse<AddressResponse>>> {
    let addresses = AddressService::new(state.pool());
    let address = addresses
        .get(
            &caller,
            &ContactId::new(contact_id),
            &AddressId::new(address_id),
        )
        .await?;

    Ok(Json(WebResponse::ok(address.into())))
}

/// Update one address of a contact.
///
/// PUT /api/contacts/{contactId}/addresses/{addressId}
///
/// # Errors
///
/// Returns 404 when the contact or the address cannot be resolved under the
/// caller, 400 for malformed fields.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((contact_id, address_id)): Path<(String, String)>,
    Json(request): Json<AddressRequest>,
) -> Result<Json<WebResponse<AddressResponse>>> {
    let addresses = AddressService::new(state.pool());
    let address = addresses
        .update(
            &caller,
            &ContactId::new(contact_id),
            &AddressId::new(address_id),
            request.into(),
        )
        .await?;

    Ok(Json(WebResponse::ok(address.into())))
}

/// Delete one address of a contact.
///
/// DELETE /api/contacts/{contactId}/addresses/{addressId}
///
/// # Errors
///
/// Returns 404 when the contact or the address cannot be resolved under the
/// caller; a repeat delete is the same 404.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> Result<Json<WebResponse<&'static str>>> {
    let addresses = AddressService::new(state.pool());
    addresses
        .delete(
            &caller,
            &ContactId::new(contact_id),
            &AddressId::new(address_id),
        )
        .await?;

    Ok(Json(WebResponse::ok("OK")))
}
