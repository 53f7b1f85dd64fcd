//! Request field validation.
//!
//! Services validate their input before touching the database and reject
//! with one `ValidationErrors` carrying every violation at once, so the
//! client sees all bad fields in a single 400 response.

use std::collections::BTreeMap;

use serde::Serialize;

/// Accumulated per-field validation failures.
///
/// Serializes as `{"field": ["message", ...], ...}` in the response
/// envelope's `errors` slot.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    violations: BTreeMap<String, Vec<String>>,
}

impl std::error::Error for ValidationErrors {}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.violations.keys().map(String::as_str).collect();
        write!(f, "validation failed for: {}", fields.join(", "))
    }
}

impl ValidationErrors {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.violations
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Whether any violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Turn the accumulator into a result: `Err` if anything was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Validate a required string field: non-blank and within `max` characters.
    pub fn require_text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.add(field, "must not be blank");
        } else if value.chars().count() > max {
            self.add(field, format!("must be at most {max} characters"));
        }
    }

    /// Validate an optional string field: when present, within `max` characters.
    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(v) = value
            && v.chars().count() > max
        {
            self.add(field, format!("must be at most {max} characters"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_accumulator_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_require_text() {
        let mut errors = ValidationErrors::new();
        errors.require_text("firstName", "", 100);
        errors.require_text("lastName", "ok", 100);
        errors.require_text("phone", &"9".repeat(21), 20);

        let err = errors.into_result().unwrap_err();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["firstName"][0], "must not be blank");
        assert!(json.get("lastName").is_none());
        assert_eq!(json["phone"][0], "must be at most 20 characters");
    }

    #[test]
    fn test_optional_text() {
        let mut errors = ValidationErrors::new();
        errors.optional_text("city", None, 10);
        errors.optional_text("street", Some("short"), 10);
        errors.optional_text("country", Some(&"x".repeat(11)), 10);

        let err = errors.into_result().unwrap_err();
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("city").is_none());
        assert!(json.get("street").is_none());
        assert_eq!(json["country"][0], "must be at most 10 characters");
    }

    #[test]
    fn test_multiple_messages_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("password", "must not be blank");
        errors.add("password", "must be at least 8 characters");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["password"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "must not be blank");
        errors.add("name", "must not be blank");
        assert_eq!(errors.to_string(), "validation failed for: name, username");
    }
}
