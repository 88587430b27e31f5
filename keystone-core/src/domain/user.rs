//! User domain model

use serde::{Deserialize, Serialize};

use crate::domain::entity::{deserialize_opt_id, Entity, EntityKind};
use crate::domain::validation::{
    validate_email, validate_name, validate_required, ValidationErrors,
};

/// A managed console user
///
/// `role` holds the name of a [`Role`](crate::domain::Role); the reference is
/// enforced server-side. Deletion is keyed by email (legacy server route),
/// updates by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned, opaque; may arrive as a JSON number or string
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_opt_id"
    )]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Active / inactive
    pub status: bool,
}

/// In-progress field values for a user create-or-edit dialog
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: bool,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: String::new(),
            // New users start active
            status: true,
        }
    }
}

impl Entity for User {
    type Draft = UserDraft;

    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn delete_key(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn validate(draft: &Self::Draft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_name(&mut errors, "name", &draft.name, "Name");
        validate_email(&mut errors, "email", &draft.email);
        validate_required(&mut errors, "role", &draft.role, "Role");
        errors
    }

    fn blank_draft() -> Self::Draft {
        UserDraft::default()
    }

    fn to_draft(&self) -> Self::Draft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            status: self.status,
        }
    }

    fn from_draft(draft: &Self::Draft) -> Self {
        Self {
            id: None,
            name: draft.name.clone(),
            email: draft.email.clone(),
            role: draft.role.clone(),
            status: draft.status,
        }
    }

    fn merged_with(&self, draft: &Self::Draft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            role: draft.role.clone(),
            status: draft.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> UserDraft {
        UserDraft {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            role: "Admin".to_string(),
            status: true,
        }
    }

    #[test]
    fn test_blank_draft_defaults_active() {
        let draft = User::blank_draft();
        assert!(draft.status);
        assert!(draft.name.is_empty());
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(User::validate(&valid_draft()).is_empty());
    }

    #[test]
    fn test_empty_draft_fails_all_required_fields() {
        let errors = User::validate(&UserDraft::default());
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("role"), Some("Role is required"));
    }

    #[test]
    fn test_short_name_and_bad_email() {
        let mut draft = valid_draft();
        draft.name = "Al".to_string();
        draft.email = "not-an-email".to_string();
        let errors = User::validate(&draft);
        assert_eq!(
            errors.get("name"),
            Some("Name must be at least 3 characters long")
        );
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_merge_preserves_identifier() {
        let existing = User {
            id: Some("1".to_string()),
            name: "Al".to_string(),
            email: "a@x.com".to_string(),
            role: "Admin".to_string(),
            status: true,
        };
        let mut draft = existing.to_draft();
        draft.status = false;
        let merged = existing.merged_with(&draft);
        assert_eq!(merged.id.as_deref(), Some("1"));
        assert_eq!(merged.email, "a@x.com");
        assert!(!merged.status);
    }

    #[test]
    fn test_new_record_has_no_id_on_the_wire() {
        let user = User::from_draft(&valid_draft());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_numeric_id_normalizes_to_string() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "role": "Admin",
            "status": true
        }))
        .unwrap();
        assert_eq!(user.id.as_deref(), Some("7"));
    }
}
