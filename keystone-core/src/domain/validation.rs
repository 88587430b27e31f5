//! Form validation primitives
//!
//! Validation runs synchronously against a draft before any network call.
//! A draft that fails validation never reaches the sync client.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::Serialize;

/// Minimum length for user and role names
const MIN_NAME_LEN: usize = 3;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Field-level validation violations, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Record a violation for a field
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// The violation message for a field, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Check an email value against a standard email shape
pub fn is_valid_email(value: &str) -> bool {
    let email_re = Regex::new(EMAIL_PATTERN).unwrap();
    email_re.is_match(value)
}

/// Apply the shared name rule: required, at least three characters
pub(crate) fn validate_name(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    label: &str,
) {
    if value.is_empty() {
        errors.insert(field, format!("{} is required", label));
    } else if value.chars().count() < MIN_NAME_LEN {
        errors.insert(
            field,
            format!("{} must be at least {} characters long", label, MIN_NAME_LEN),
        );
    }
}

/// Apply the email rule: required, standard email shape
pub(crate) fn validate_email(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.insert(field, "Email is required");
    } else if !is_valid_email(value) {
        errors.insert(field, "Invalid email format");
    }
}

/// Apply a plain required rule
pub(crate) fn validate_required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    label: &str,
) {
    if value.is_empty() {
        errors.insert(field, format!("{} is required", label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_shapes() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(is_valid_email("user+tag@example.co"));
    }

    #[test]
    fn test_invalid_email_shapes() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn test_name_rule_messages() {
        let mut errors = ValidationErrors::new();
        validate_name(&mut errors, "name", "", "Name");
        assert_eq!(errors.get("name"), Some("Name is required"));

        let mut errors = ValidationErrors::new();
        validate_name(&mut errors, "name", "Ed", "Name");
        assert_eq!(
            errors.get("name"),
            Some("Name must be at least 3 characters long")
        );

        let mut errors = ValidationErrors::new();
        validate_name(&mut errors, "name", "Eda", "Name");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_errors_are_ordered_by_field() {
        let mut errors = ValidationErrors::new();
        errors.insert("role", "Role is required");
        errors.insert("email", "Email is required");
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["email", "role"]);
    }
}
