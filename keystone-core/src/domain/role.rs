//! Role domain model

use serde::{Deserialize, Serialize};

use crate::domain::entity::{deserialize_opt_id, Entity, EntityKind};
use crate::domain::validation::{validate_name, ValidationErrors};

/// Per-role permission flags
///
/// Always exactly these three flags; no partial permission records are
/// constructed. Flags default to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub delete: bool,
}

impl Permissions {
    /// Number of flags set to true (0-3)
    pub fn granted_count(&self) -> usize {
        [self.read, self.write, self.delete]
            .iter()
            .filter(|flag| **flag)
            .count()
    }

    /// Space-separated names of the granted flags, or "-" when none
    pub fn summary(&self) -> String {
        let mut granted = Vec::new();
        if self.read {
            granted.push("Read");
        }
        if self.write {
            granted.push("Write");
        }
        if self.delete {
            granted.push("Delete");
        }
        if granted.is_empty() {
            "-".to_string()
        } else {
            granted.join(" ")
        }
    }
}

/// An access-control role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Server-assigned, opaque; may arrive as a JSON number or string
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_opt_id"
    )]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub permissions: Permissions,
}

/// In-progress field values for a role create-or-edit dialog
///
/// `permissions` is optional so an absent permissions value is expressible;
/// the validation rule fails only on absence, never on the flag values.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDraft {
    pub name: String,
    pub permissions: Option<Permissions>,
}

impl Default for RoleDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            permissions: Some(Permissions::default()),
        }
    }
}

impl Entity for Role {
    type Draft = RoleDraft;

    const KIND: EntityKind = EntityKind::Role;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn delete_key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn validate(draft: &Self::Draft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_name(&mut errors, "name", &draft.name, "Role name");
        if draft.permissions.is_none() {
            errors.insert("permissions", "Permissions are required");
        }
        errors
    }

    fn blank_draft() -> Self::Draft {
        RoleDraft::default()
    }

    fn to_draft(&self) -> Self::Draft {
        RoleDraft {
            name: self.name.clone(),
            permissions: Some(self.permissions),
        }
    }

    fn from_draft(draft: &Self::Draft) -> Self {
        Self {
            id: None,
            name: draft.name.clone(),
            permissions: draft.permissions.unwrap_or_default(),
        }
    }

    fn merged_with(&self, draft: &Self::Draft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name.clone(),
            // An absent permissions value keeps the prior flags
            permissions: draft.permissions.unwrap_or(self.permissions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_draft_has_all_flags_false() {
        let draft = Role::blank_draft();
        assert_eq!(draft.permissions, Some(Permissions::default()));
        assert_eq!(draft.permissions.unwrap().granted_count(), 0);
    }

    #[test]
    fn test_short_name_fails() {
        let draft = RoleDraft {
            name: "Ed".to_string(),
            permissions: Some(Permissions {
                read: true,
                write: false,
                delete: false,
            }),
        };
        let errors = Role::validate(&draft);
        assert_eq!(
            errors.get("name"),
            Some("Role name must be at least 3 characters long")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_missing_permissions_fails() {
        let draft = RoleDraft {
            name: "Editor".to_string(),
            permissions: None,
        };
        let errors = Role::validate(&draft);
        assert_eq!(errors.get("permissions"), Some("Permissions are required"));
    }

    #[test]
    fn test_granted_count() {
        let all = Permissions {
            read: true,
            write: true,
            delete: true,
        };
        assert_eq!(all.granted_count(), 3);
        assert_eq!(Permissions::default().granted_count(), 0);
    }

    #[test]
    fn test_permissions_summary() {
        let perms = Permissions {
            read: true,
            write: true,
            delete: false,
        };
        assert_eq!(perms.summary(), "Read Write");
        assert_eq!(Permissions::default().summary(), "-");
    }

    #[test]
    fn test_merge_without_permissions_keeps_prior_flags() {
        let existing = Role {
            id: Some("2".to_string()),
            name: "Editor".to_string(),
            permissions: Permissions {
                read: true,
                write: true,
                delete: false,
            },
        };
        let draft = RoleDraft {
            name: "Editors".to_string(),
            permissions: None,
        };
        let merged = existing.merged_with(&draft);
        assert_eq!(merged.id.as_deref(), Some("2"));
        assert_eq!(merged.name, "Editors");
        assert!(merged.permissions.write);
    }

    #[test]
    fn test_deserialize_partial_permissions_fills_false() {
        let role: Role = serde_json::from_value(serde_json::json!({
            "id": "5",
            "name": "Viewer",
            "permissions": { "read": true }
        }))
        .unwrap();
        assert!(role.permissions.read);
        assert!(!role.permissions.write);
        assert!(!role.permissions.delete);
    }
}
