//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is empty or whitespace only.
    #[error("username cannot be blank")]
    Blank,
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or control characters.
    #[error("username cannot contain whitespace or control characters")]
    InvalidCharacter,
}

/// A login username.
///
/// Usernames are the unique public identifier of an account. They are
/// compared byte-for-byte, so the type rejects anything that would make two
/// visually identical names differ: surrounding whitespace, embedded spaces,
/// and control characters.
///
/// ## Constraints
///
/// - Length: 1-100 characters
/// - No whitespace or control characters anywhere in the value
///
/// ## Examples
///
/// ```
/// use rolodex_core::Username;
///
/// assert!(Username::parse("alice").is_ok());
/// assert!(Username::parse("alice.w+test").is_ok());
///
/// assert!(Username::parse("").is_err());
/// assert!(Username::parse("   ").is_err());
/// assert!(Username::parse("two words").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 100;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, longer than 100 characters,
    /// or contains whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.trim().is_empty() {
            return Err(UsernameError::Blank);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
