//! In-memory store adapter
//!
//! An in-process fake of the remote admin service implementing the same
//! contract: sequential numeric ids on create, full-record replacement on
//! update, user deletion keyed by email (legacy route), 404 on missing
//! targets. Backs demo mode and the test suites.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use crate::domain::result::{Error, Result};
use crate::domain::EntityKind;
use crate::ports::RemoteStore;

#[derive(Debug, Default)]
struct Collections {
    users: Vec<JsonValue>,
    roles: Vec<JsonValue>,
}

impl Collections {
    fn for_kind(&mut self, kind: EntityKind) -> &mut Vec<JsonValue> {
        match kind {
            EntityKind::User => &mut self.users,
            EntityKind::Role => &mut self.roles,
        }
    }

    fn snapshot(&self, kind: EntityKind) -> Vec<JsonValue> {
        match kind {
            EntityKind::User => self.users.clone(),
            EntityKind::Role => self.roles.clone(),
        }
    }
}

/// In-memory remote store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
    next_id: AtomicI64,
    failing: AtomicBool,
    requests: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Collections::default()),
            next_id: AtomicI64::new(1),
            failing: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    /// Store seeded with a small RBAC data set for demo mode
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        {
            let mut inner = store.collections();
            inner.roles = vec![
                json!({ "id": 1, "name": "Admin",
                        "permissions": { "read": true, "write": true, "delete": true } }),
                json!({ "id": 2, "name": "Editor",
                        "permissions": { "read": true, "write": true, "delete": false } }),
                json!({ "id": 3, "name": "Viewer",
                        "permissions": { "read": true, "write": false, "delete": false } }),
            ];
            inner.users = vec![
                json!({ "id": 4, "name": "Ada Lovelace", "email": "ada@example.com",
                        "role": "Admin", "status": true }),
                json!({ "id": 5, "name": "Grace Hopper", "email": "grace@example.com",
                        "role": "Editor", "status": true }),
                json!({ "id": 6, "name": "Alan Turing", "email": "alan@example.com",
                        "role": "Viewer", "status": false }),
            ];
        }
        store.next_id.store(7, Ordering::SeqCst);
        store
    }

    /// Make every subsequent request fail with a transport error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Total requests received, including failed ones
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn collections(&self) -> MutexGuard<'_, Collections> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn begin_request(&self) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::transport("Unable to reach the admin service"));
        }
        Ok(())
    }

    /// Read a record field as a key string, accepting number or string values
    fn key_of(record: &JsonValue, field: &str) -> Option<String> {
        match record.get(field) {
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            Some(JsonValue::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list(&self, kind: EntityKind) -> Result<Vec<JsonValue>> {
        self.begin_request()?;
        Ok(self.collections().snapshot(kind))
    }

    async fn create(&self, kind: EntityKind, mut record: JsonValue) -> Result<JsonValue> {
        self.begin_request()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Some(object) = record.as_object_mut() {
            // Sequential numeric ids, matching the real backend
            object.insert("id".to_string(), JsonValue::from(id));
        }
        self.collections().for_kind(kind).push(record.clone());
        Ok(record)
    }

    async fn update(&self, kind: EntityKind, id: &str, mut record: JsonValue) -> Result<JsonValue> {
        self.begin_request()?;
        let mut inner = self.collections();
        let records = inner.for_kind(kind);
        let position = records
            .iter()
            .position(|existing| Self::key_of(existing, "id").as_deref() == Some(id));
        match position {
            Some(index) => {
                // Full replacement; the path keys the update, not the body id
                let existing_id = records[index].get("id").cloned();
                if let (Some(object), Some(id_value)) = (record.as_object_mut(), existing_id) {
                    object.insert("id".to_string(), id_value);
                }
                records[index] = record.clone();
                Ok(record)
            }
            None => Err(Error::transport("HTTP 404 Not Found")),
        }
    }

    async fn delete(&self, kind: EntityKind, key: &str) -> Result<()> {
        self.begin_request()?;
        let field = kind.delete_field();
        let mut inner = self.collections();
        let records = inner.for_kind(kind);
        let position = records
            .iter()
            .position(|existing| Self::key_of(existing, field).as_deref() == Some(key));
        match position {
            Some(index) => {
                records.remove(index);
                Ok(())
            }
            None => Err(Error::transport("HTTP 404 Not Found")),
        }
    }
}
