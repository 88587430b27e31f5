//! REST adapter for the remote admin service
//!
//! Implements the [`RemoteStore`] port over HTTP. The service exposes a
//! collection endpoint per kind (`/users`, `/roles`) and item endpoints
//! keyed by identifier, except user deletion which routes by email.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::EntityKind;
use crate::ports::RemoteStore;

/// Default base URL of the admin service
pub const DEFAULT_BASE_URL: &str = "http://localhost:2004";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the remote admin service
#[derive(Debug)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/{}", self.base_url, kind.collection())
    }

    fn item_url(&self, kind: EntityKind, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, kind.collection(), key)
    }

    /// Map request errors to user-facing transport errors
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::transport(format!(
                "Request timed out after {} seconds",
                REQUEST_TIMEOUT_SECS
            ))
        } else if error.is_connect() {
            Error::transport("Unable to reach the admin service")
        } else {
            Error::transport(format!("Request failed: {}", error))
        }
    }

    /// Map non-2xx responses to transport errors
    fn check_status(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 404 {
            // Deleting an already-absent record lands here; the client does
            // not distinguish it from other transport failures
            Err(Error::transport("HTTP 404 Not Found"))
        } else {
            Err(Error::transport(format!("Server returned HTTP {}", status.as_u16())))
        }
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn list(&self, kind: EntityKind) -> Result<Vec<JsonValue>> {
        let url = self.collection_url(kind);
        debug!(%url, "GET collection");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;
        self.check_status(&response)?;

        response
            .json::<Vec<JsonValue>>()
            .await
            .map_err(|e| Error::transport(format!("Failed to parse {} list: {}", kind.label(), e)))
    }

    async fn create(&self, kind: EntityKind, record: JsonValue) -> Result<JsonValue> {
        let url = self.collection_url(kind);
        debug!(%url, "POST record");

        let response = self
            .client
            .post(&url)
            .json(&record)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;
        self.check_status(&response)?;

        response.json().await.map_err(|e| {
            Error::transport(format!("Failed to parse created {}: {}", kind.label(), e))
        })
    }

    async fn update(&self, kind: EntityKind, id: &str, record: JsonValue) -> Result<JsonValue> {
        let url = self.item_url(kind, id);
        debug!(%url, "PUT record");

        let response = self
            .client
            .put(&url)
            .json(&record)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;
        self.check_status(&response)?;

        response.json().await.map_err(|e| {
            Error::transport(format!("Failed to parse updated {}: {}", kind.label(), e))
        })
    }

    async fn delete(&self, kind: EntityKind, key: &str) -> Result<()> {
        let url = self.item_url(kind, key);
        debug!(%url, "DELETE record");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;
        self.check_status(&response)
    }
}
