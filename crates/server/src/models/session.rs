//! Session-related types.

use chrono::{DateTime, Utc};

use rolodex_core::{UserId, Username};

/// A login session (domain type).
///
/// Sessions are rows keyed by their opaque token. A user may hold several
/// at once; logout removes only the presented one.
#[derive(Debug, Clone)]
pub struct Session {
    /// The opaque token presented in the `X-API-TOKEN` header.
    pub token: String,
    /// User this session authenticates.
    pub user_id: UserId,
    /// Instant after which the session no longer authenticates.
    pub expires_at: DateTime<Utc>,
    /// When the session was minted.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// The authenticated caller, resolved from a session token.
///
/// Carried into handlers by the `RequireAuth` extractor. Includes the
/// presented token so logout can remove exactly that session.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's login name.
    pub username: Username,
    /// User's display name.
    pub display_name: String,
    /// The session token this request authenticated with.
    pub token: String,
}
