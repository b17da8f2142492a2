//! Suggestion sinks
//!
//! The sink owns the process's suggestion collection. It is the only
//! structure shared across resource tasks, so each implementation
//! serializes its own internal state.

mod memory;
mod persisted;

pub use memory::InMemorySuggestionSink;
pub use persisted::PersistedSuggestionSink;

use crate::models::Suggestion;
use crate::store::StoreError;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by destructive sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("backing store failure: {0}")]
    Store(#[from] StoreError),
}

/// Append-only store of suggestions
///
/// `add_suggestion` failures are returned so the caller can log and drop;
/// the next tick naturally re-evaluates. Reads degrade to empty rather
/// than propagating backend trouble.
#[async_trait]
pub trait SuggestionSink: Send + Sync {
    async fn add_suggestion(&self, suggestion: Suggestion) -> Result<(), SinkError>;

    /// Current suggestions in append order; the caller owns the returned copy
    async fn get_suggestions(&self) -> Vec<Suggestion>;

    async fn clear_suggestions(&self) -> Result<(), SinkError>;

    /// Arm a time-to-live after which the whole collection self-purges
    async fn expire_suggestions(&self, ttl: Duration) -> Result<(), SinkError>;

    /// Backend tag reported by the status endpoint
    fn kind(&self) -> &'static str;
}
