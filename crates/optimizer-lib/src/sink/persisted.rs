//! Document-store backed suggestion sink

use super::{SinkError, SuggestionSink};
use crate::models::Suggestion;
use crate::store::{DocumentStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Sink persisting suggestions in an external document store
///
/// All suggestions live in one array document under a fixed key, so the
/// history survives process restarts. Appends are idempotent on the dedup
/// key, which keeps a rule re-firing every tick from flooding the store.
pub struct PersistedSuggestionSink {
    store: Arc<dyn DocumentStore>,
    key: String,
    /// TTL applied when the key is first created
    initial_ttl: Option<Duration>,
}

impl PersistedSuggestionSink {
    pub fn new(store: Arc<dyn DocumentStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            initial_ttl: None,
        }
    }

    /// Arm a TTL on the suggestion document as soon as it is created
    pub fn with_initial_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.initial_ttl = ttl;
        self
    }

    /// Create the key as an empty array if it is absent
    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.store.exists(&self.key).await? {
            return Ok(());
        }
        self.store
            .set_document(&self.key, Value::Array(Vec::new()))
            .await?;
        if let Some(ttl) = self.initial_ttl {
            self.store.set_expiry(&self.key, ttl).await?;
        }
        Ok(())
    }

    /// Read the stored array, treating a malformed document as empty
    async fn read_all(&self) -> Result<Vec<Suggestion>, StoreError> {
        let doc = match self.store.get_document(&self.key).await? {
            Some(doc) => doc,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_value(doc) {
            Ok(suggestions) => Ok(suggestions),
            Err(error) => {
                warn!(key = %self.key, error = %error, "Malformed suggestion document, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn try_add(&self, suggestion: &Suggestion) -> Result<(), StoreError> {
        self.ensure_initialized().await?;

        let existing = self.read_all().await?;
        if existing
            .iter()
            .any(|entry| entry.dedup_key() == suggestion.dedup_key())
        {
            debug!(
                resource_id = %suggestion.resource_id,
                action = %suggestion.action,
                "Duplicate suggestion suppressed"
            );
            return Ok(());
        }

        let item = serde_json::to_value(suggestion)?;
        self.store.append_to_array(&self.key, item).await
    }
}

#[async_trait]
impl SuggestionSink for PersistedSuggestionSink {
    async fn add_suggestion(&self, suggestion: Suggestion) -> Result<(), SinkError> {
        self.try_add(&suggestion).await.map_err(SinkError::from)
    }

    async fn get_suggestions(&self) -> Vec<Suggestion> {
        match self.read_all().await {
            Ok(suggestions) => suggestions,
            Err(error) => {
                warn!(key = %self.key, error = %error, "Suggestion read degraded to empty");
                Vec::new()
            }
        }
    }

    async fn clear_suggestions(&self) -> Result<(), SinkError> {
        self.store
            .set_document(&self.key, Value::Array(Vec::new()))
            .await
            .map_err(SinkError::from)
    }

    async fn expire_suggestions(&self, ttl: Duration) -> Result<(), SinkError> {
        self.store
            .set_expiry(&self.key, ttl)
            .await
            .map_err(SinkError::from)
    }

    fn kind(&self) -> &'static str {
        "persisted"
    }
}
