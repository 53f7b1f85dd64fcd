//! Uniform response envelope.
//!
//! Every API response is `{"data": ..., "errors": ..., "paging": ...}` with
//! absent slots omitted. Mutations without a payload answer `"data": "OK"`.

use serde::Serialize;

use rolodex_core::Paging;

use crate::validation::ValidationErrors;

/// The error slot of the envelope.
///
/// Validation failures itemize per-field messages; every other error is a
/// single string.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Generic error message.
    Message(String),
    /// Per-field validation messages.
    Fields(ValidationErrors),
}

/// The uniform response wrapper separating payload from error information.
#[derive(Debug, Serialize)]
pub struct WebResponse<T> {
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error information on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorBody>,
    /// Paging metadata on list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T> WebResponse<T> {
    /// Successful response carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
            paging: None,
        }
    }

    /// Successful list response carrying `data` plus paging metadata.
    #[must_use]
    pub const fn ok_paged(data: T, paging: Paging) -> Self {
        Self {
            data: Some(data),
            errors: None,
            paging: Some(paging),
        }
    }
}

impl WebResponse<()> {
    /// Failed response carrying only the error slot.
    #[must_use]
    pub const fn error(errors: ErrorBody) -> Self {
        Self {
            data: None,
            errors: Some(errors),
            paging: None,
        }
    }
}
