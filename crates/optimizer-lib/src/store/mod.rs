//! Abstract document store
//!
//! The persistence seam for suggestion history. The core only needs a
//! handful of document operations; the wire protocol behind them is a
//! deployment concern and lives outside this crate.

mod memory;

pub use memory::InMemoryDocumentStore;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("document at key '{0}' is not an array")]
    NotAnArray(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Minimal document operations the optimizer relies on
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    async fn get_document(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set_document(&self, key: &str, doc: Value) -> Result<(), StoreError>;

    /// Append one item to the array stored at `key`, creating the array if
    /// the key is absent
    async fn append_to_array(&self, key: &str, item: Value) -> Result<(), StoreError>;

    /// Arm a time-to-live on the whole key
    async fn set_expiry(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;
}
