//! In-process document store
//!
//! Backs the persisted sink in tests and single-process deployments where
//! no external store is wired in. Honors per-key expiry on read.

use super::{DocumentStore, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};

struct StoredDocument {
    value: Value,
    expires_at: Option<Instant>,
}

impl StoredDocument {
    fn is_expired(&self) -> bool {
        self.expires_at
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false)
    }
}

/// Document store keeping everything in process memory
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<String, StoredDocument>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Drop the key if its TTL has elapsed
    fn purge_if_expired(&self, key: &str) {
        let expired = self
            .documents
            .get(key)
            .map(|entry| entry.is_expired())
            .unwrap_or(false);
        if expired {
            self.documents.remove(key);
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.purge_if_expired(key);
        Ok(self.documents.contains_key(key))
    }

    async fn get_document(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.purge_if_expired(key);
        Ok(self.documents.get(key).map(|entry| entry.value.clone()))
    }

    async fn set_document(&self, key: &str, doc: Value) -> Result<(), StoreError> {
        self.documents.insert(
            key.to_string(),
            StoredDocument {
                value: doc,
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn append_to_array(&self, key: &str, item: Value) -> Result<(), StoreError> {
        self.purge_if_expired(key);
        let mut entry = self
            .documents
            .entry(key.to_string())
            .or_insert_with(|| StoredDocument {
                value: Value::Array(Vec::new()),
                expires_at: None,
            });
        match &mut entry.value {
            Value::Array(items) => {
                items.push(item);
                Ok(())
            }
            _ => Err(StoreError::NotAnArray(key.to_string())),
        }
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        if let Some(mut entry) = self.documents.get_mut(key) {
            entry.expires_at = Some(Instant::now() + ttl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let store = InMemoryDocumentStore::new();
        assert!(!store.exists("nope").await.unwrap());
        assert!(store.get_document("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_creates_array() {
        let store = InMemoryDocumentStore::new();
        store.append_to_array("k", json!({"n": 1})).await.unwrap();
        store.append_to_array("k", json!({"n": 2})).await.unwrap();

        let doc = store.get_document("k").await.unwrap().unwrap();
        assert_eq!(doc.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_append_to_non_array_fails() {
        let store = InMemoryDocumentStore::new();
        store.set_document("k", json!({"not": "array"})).await.unwrap();

        let err = store.append_to_array("k", json!(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnArray(_)));
    }

    #[tokio::test]
    async fn test_expired_key_disappears() {
        let store = InMemoryDocumentStore::new();
        store.set_document("k", json!([1])).await.unwrap();
        store
            .set_expiry("k", Duration::from_millis(20))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!store.exists("k").await.unwrap());
        assert!(store.get_document("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_document_clears_expiry() {
        let store = InMemoryDocumentStore::new();
        store.set_document("k", json!([1])).await.unwrap();
        store
            .set_expiry("k", Duration::from_millis(20))
            .await
            .unwrap();
        store.set_document("k", json!([2])).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(store.exists("k").await.unwrap());
    }
}
