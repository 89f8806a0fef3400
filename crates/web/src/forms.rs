//! Shared form validation helpers.
//!
//! Each form schema lives beside its route handlers; the helpers here hold
//! the field-level checks they share. All checks are structural (non-empty,
//! URL shape, email shape), never reachability.

use std::collections::BTreeMap;

use coffee_wifi_core::{Email, EmailError};
use url::Url;

/// Field-level validation errors keyed by form field name.
///
/// Templates look messages up per field to redisplay the form inline.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FormErrors {
    /// Record an error message for a field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Get the error message for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// True when no field failed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Require a non-empty value (after trimming).
pub fn require(errors: &mut FormErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(field, format!("{label} is required"));
    }
}

/// Require a well-formed absolute URL (scheme + host shape).
pub fn require_url(errors: &mut FormErrors, field: &'static str, value: &str, label: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{label} is required"));
        return;
    }
    match Url::parse(trimmed) {
        Ok(url) if url.has_host() => {}
        _ => errors.push(field, format!("{label} must be a well-formed URL")),
    }
}

/// Require a structurally valid email address.
///
/// Returns the parsed [`Email`] so handlers never re-parse on success.
pub fn require_email(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<Email> {
    match Email::parse(value.trim()) {
        Ok(email) => Some(email),
        Err(EmailError::Empty) => {
            errors.push(field, "Email is required");
            None
        }
        Err(e) => {
            errors.push(field, e.to_string());
            None
        }
    }
}

/// Coerce an HTML checkbox value to a boolean.
///
/// Browsers omit unchecked checkboxes entirely, so absence (or an empty
/// value) is false and any submitted value ("on") is true.
#[must_use]
pub fn checkbox_checked(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_require_flags_empty_and_whitespace() {
        let mut errors = FormErrors::default();
        require(&mut errors, "name", "", "Cafe name");
        require(&mut errors, "location", "   ", "Location");
        require(&mut errors, "seats", "20-30", "Seats");

        assert_eq!(errors.get("name"), Some("Cafe name is required"));
        assert!(errors.get("location").is_some());
        assert!(errors.get("seats").is_none());
    }

    #[test]
    fn test_require_url_accepts_scheme_and_host() {
        let mut errors = FormErrors::default();
        require_url(&mut errors, "map_url", "https://maps.example.com/x", "Map URL");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_require_url_rejects_malformed() {
        for bad in ["not a url", "example.com/no-scheme", "mailto:"] {
            let mut errors = FormErrors::default();
            require_url(&mut errors, "map_url", bad, "Map URL");
            assert!(errors.get("map_url").is_some(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_require_email() {
        let mut errors = FormErrors::default();
        let email = require_email(&mut errors, "email", " alice@example.com ");
        assert_eq!(email.unwrap().as_str(), "alice@example.com");
        assert!(errors.is_empty());

        let mut errors = FormErrors::default();
        assert!(require_email(&mut errors, "email", "no-at-symbol").is_none());
        assert!(errors.get("email").is_some());

        let mut errors = FormErrors::default();
        assert!(require_email(&mut errors, "email", "").is_none());
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn test_checkbox_checked() {
        assert!(checkbox_checked(Some(&"on".to_owned())));
        assert!(checkbox_checked(Some(&"y".to_owned())));
        assert!(!checkbox_checked(Some(&String::new())));
        assert!(!checkbox_checked(None));
    }

    #[test]
    fn test_form_errors_keeps_first_message() {
        let mut errors = FormErrors::default();
        errors.push("name", "first");
        errors.push("name", "second");
        assert_eq!(errors.get("name"), Some("first"));
    }
}
