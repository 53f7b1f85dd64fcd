//! Contact route handlers.

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use rolodex_core::{ContactId, Email, PageRequest};

use crate::db::contacts::ContactFilter;
use crate::envelope::WebResponse;
use crate::error::Result;
use crate::extract::{Json, Query};
use crate::middleware::RequireAuth;
use crate::models::Contact;
use crate::services::ContactService;
use crate::services::contacts::ContactInput;
use crate::state::AppState;

/// Contact create/update request body.
///
/// On update, absent optional fields keep their stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<ContactRequest> for ContactInput {
    fn from(request: ContactRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Query parameters of the contact listing.
#[derive(Debug, Deserialize)]
pub struct SearchContactQuery {
    /// Case-insensitive substring over first or last name.
    pub name: Option<String>,
    /// Case-insensitive substring over the email.
    pub email: Option<String>,
    /// Substring over the phone number.
    pub phone: Option<String>,
    /// Zero-based page number (default 0).
    pub page: Option<u32>,
    /// Page size (default 10, capped at 100).
    pub size: Option<u32>,
}

/// Contact payload returned by the contact endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.into_inner(),
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email.map(Email::into_inner),
            phone: contact.phone,
        }
    }
}

/// Create a contact.
///
/// POST /api/contacts
///
/// # Errors
///
/// Returns 401 when unauthenticated, 400 for malformed fields.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<ContactRequest>,
) -> Result<Json<WebResponse<ContactResponse>>> {
    let contacts = ContactService::new(state.pool());
    let contact = contacts.create(&caller, request.into()).await?;

    Ok(Json(WebResponse::ok(contact.into())))
}

/// Fetch one contact.
///
/// GET /api/contacts/{contactId}
///
/// # Errors
///
/// Returns 404 for an unknown or foreign id.
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(contact_id): Path<String>,
) -> Result<Json<WebResponse<ContactResponse>>> {
    let contacts = ContactService::new(state.pool());
    let contact = contacts.get(&caller, &ContactId::new(contact_id)).await?;

    Ok(Json(WebResponse::ok(contact.into())))
}

/// Update one contact.
///
/// PUT /api/contacts/{contactId}
///
/// # Errors
///
/// Returns 404 for an unknown or foreign id, 400 for malformed fields.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(contact_id): Path<String>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<WebResponse<ContactResponse>>> {
    let contacts = ContactService::new(state.pool());
    let contact = contacts
        .update(&caller, &ContactId::new(contact_id), request.into())
        .await?;

    Ok(Json(WebResponse::ok(contact.into())))
}

/// Delete one contact and its addresses.
///
/// DELETE /api/contacts/{contactId}
///
/// # Errors
///
/// Returns 404 for an unknown or foreign id.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(contact_id): Path<String>,
) -> Result<Json<WebResponse<&'static str>>> {
    let contacts = ContactService::new(state.pool());
    contacts.delete(&caller, &ContactId::new(contact_id)).await?;

    Ok(Json(WebResponse::ok("OK")))
}

/// Filtered, paginated listing of the caller's contacts.
///
/// GET /api/contacts
///
/// # Errors
///
/// Returns 401 when unauthenticated.
pub async fn search(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Query(query): Query<SearchContactQuery>,
) -> Result<Json<WebResponse<Vec<ContactResponse>>>> {
    let page = PageRequest::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
    );
    let filter = ContactFilter {
        name: query.name,
        email: query.email,
        phone: query.phone,
    };

    let contacts = ContactService::new(state.pool());
    let result = contacts.search(&caller, filter, page).await?;

    let items = result.items.into_iter().map(Into::into).collect();
    Ok(Json(WebResponse::ok_paged(items, result.paging)))
}
