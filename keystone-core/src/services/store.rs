//! Entity store - in-memory mirror of the last known server state
//!
//! The store is mutated only in direct response to a successful sync
//! operation; a failed operation leaves it unchanged. Every mutation bumps
//! a revision counter so derived views can detect snapshot changes without
//! being tied to any particular refresh mechanism.

use crate::domain::Entity;

/// Ordered collection of the last-synchronized records for one kind
#[derive(Debug)]
pub struct EntityStore<E: Entity> {
    records: Vec<E>,
    revision: u64,
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            revision: 0,
        }
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Monotonic counter, bumped on every snapshot change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record with the given identifier, if present
    pub fn get(&self, id: &str) -> Option<&E> {
        self.records.iter().find(|record| record.id() == Some(id))
    }

    /// Record matching the kind's delete key, if present
    pub fn find_by_key(&self, key: &str) -> Option<&E> {
        self.records.iter().find(|record| record.matches_key(key))
    }

    /// Replace the whole collection (after a successful list)
    pub fn replace_all(&mut self, records: Vec<E>) {
        self.records = records;
        self.revision += 1;
    }

    /// Replace the record whose identifier matches, or append if none does
    /// (after a successful create or update)
    pub fn upsert(&mut self, record: E) {
        let position = record
            .id()
            .and_then(|id| self.records.iter().position(|r| r.id() == Some(id)));
        match position {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
        self.revision += 1;
    }

    /// Remove the record matching the delete key (after a successful delete).
    /// Removing an absent key changes nothing.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| !record.matches_key(key));
        let removed = self.records.len() != before;
        if removed {
            self.revision += 1;
        }
        removed
    }
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Permissions, Role, User};

    fn user(id: &str, email: &str) -> User {
        User {
            id: Some(id.to_string()),
            name: format!("User {}", id),
            email: email.to_string(),
            role: "Viewer".to_string(),
            status: true,
        }
    }

    #[test]
    fn test_upsert_appends_then_replaces() {
        let mut store = EntityStore::new();
        store.upsert(user("1", "a@x.com"));
        store.upsert(user("2", "b@x.com"));
        assert_eq!(store.len(), 2);

        let mut changed = user("1", "a@x.com");
        changed.status = false;
        store.upsert(changed);
        assert_eq!(store.len(), 2);
        assert!(!store.get("1").unwrap().status);
    }

    #[test]
    fn test_upsert_preserves_order() {
        let mut store = EntityStore::new();
        store.upsert(user("1", "a@x.com"));
        store.upsert(user("2", "b@x.com"));
        store.upsert(user("1", "a2@x.com"));
        let emails: Vec<&str> = store.records().iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["a2@x.com", "b@x.com"]);
    }

    #[test]
    fn test_remove_targets_exactly_one_record() {
        let mut store = EntityStore::new();
        store.upsert(user("1", "a@x.com"));
        store.upsert(user("2", "b@x.com"));
        // Users are keyed by email for deletion
        assert!(store.remove("a@x.com"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].email, "b@x.com");
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut store = EntityStore::new();
        store.upsert(user("1", "a@x.com"));
        let revision = store.revision();
        assert!(!store.remove("nobody@x.com"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_roles_remove_by_id() {
        let mut store = EntityStore::new();
        store.upsert(Role {
            id: Some("3".to_string()),
            name: "Viewer".to_string(),
            permissions: Permissions::default(),
        });
        assert!(store.remove("3"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_mutations_bump_revision() {
        let mut store = EntityStore::new();
        assert_eq!(store.revision(), 0);
        store.replace_all(vec![user("1", "a@x.com")]);
        assert_eq!(store.revision(), 1);
        store.upsert(user("2", "b@x.com"));
        assert_eq!(store.revision(), 2);
        store.remove("b@x.com");
        assert_eq!(store.revision(), 3);
    }
}
