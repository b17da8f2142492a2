//! In-memory suggestion sink

use super::{SinkError, SuggestionSink};
use crate::models::Suggestion;
use async_trait::async_trait;
use std::sync::RwLock;
use std::time::{Duration, Instant};

#[derive(Default)]
struct SinkState {
    suggestions: Vec<Suggestion>,
    expires_at: Option<Instant>,
}

impl SinkState {
    fn purge_if_expired(&mut self) {
        if self
            .expires_at
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false)
        {
            self.suggestions.clear();
            self.expires_at = None;
        }
    }
}

/// Append-only list guarded by a single reader/writer lock
///
/// Lives and dies with the process; no deduplication, every accepted
/// suggestion is kept in arrival order.
#[derive(Default)]
pub struct InMemorySuggestionSink {
    state: RwLock<SinkState>,
}

impl InMemorySuggestionSink {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SinkState::default()),
        }
    }
}

#[async_trait]
impl SuggestionSink for InMemorySuggestionSink {
    async fn add_suggestion(&self, suggestion: Suggestion) -> Result<(), SinkError> {
        let mut state = self.state.write().unwrap();
        state.purge_if_expired();
        state.suggestions.push(suggestion);
        Ok(())
    }

    async fn get_suggestions(&self) -> Vec<Suggestion> {
        let expired = {
            let state = self.state.read().unwrap();
            state
                .expires_at
                .map(|deadline| Instant::now() >= deadline)
                .unwrap_or(false)
        };
        if expired {
            self.state.write().unwrap().purge_if_expired();
        }
        self.state.read().unwrap().suggestions.clone()
    }

    async fn clear_suggestions(&self) -> Result<(), SinkError> {
        let mut state = self.state.write().unwrap();
        state.suggestions.clear();
        state.expires_at = None;
        Ok(())
    }

    async fn expire_suggestions(&self, ttl: Duration) -> Result<(), SinkError> {
        self.state.write().unwrap().expires_at = Some(Instant::now() + ttl);
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::resources::ResourceKind;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn sample(resource_id: &str, message: &str) -> Suggestion {
        Suggestion {
            resource_id: resource_id.to_string(),
            resource_type: ResourceKind::Vm,
            message: message.to_string(),
            estimated_savings: 10.0,
            severity: Severity::Warning,
            priority: 2,
            action: "downsize-instance".to_string(),
            details: HashMap::new(),
            doc_link: "https://example.com".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_and_get_preserve_order() {
        let sink = InMemorySuggestionSink::new();
        sink.add_suggestion(sample("vm-1", "first")).await.unwrap();
        sink.add_suggestion(sample("vm-1", "second")).await.unwrap();

        let suggestions = sink.get_suggestions().await;
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].message, "first");
        assert_eq!(suggestions[1].message, "second");
    }

    #[tokio::test]
    async fn test_get_returns_independent_copy() {
        let sink = InMemorySuggestionSink::new();
        sink.add_suggestion(sample("vm-1", "first")).await.unwrap();

        let mut copy = sink.get_suggestions().await;
        copy.clear();

        assert_eq!(sink.get_suggestions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_empties_the_sink() {
        let sink = InMemorySuggestionSink::new();
        sink.add_suggestion(sample("vm-1", "first")).await.unwrap();
        sink.clear_suggestions().await.unwrap();

        assert!(sink.get_suggestions().await.is_empty());
    }

    #[tokio::test]
    async fn test_expiry_purges_after_deadline() {
        let sink = InMemorySuggestionSink::new();
        sink.add_suggestion(sample("vm-1", "first")).await.unwrap();
        sink.expire_suggestions(Duration::from_millis(20))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(sink.get_suggestions().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_writers_lose_nothing() {
        let sink = Arc::new(InMemorySuggestionSink::new());
        let tasks = 8usize;
        let per_task = 50usize;

        let mut handles = Vec::new();
        for task in 0..tasks {
            let sink = Arc::clone(&sink);
            handles.push(tokio::spawn(async move {
                for i in 0..per_task {
                    sink.add_suggestion(sample(
                        &format!("vm-{task}"),
                        &format!("tick {i}"),
                    ))
                    .await
                    .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let suggestions = sink.get_suggestions().await;
        assert_eq!(suggestions.len(), tasks * per_task);

        // Per-resource FIFO order survives interleaving
        for task in 0..tasks {
            let id = format!("vm-{task}");
            let messages: Vec<&str> = suggestions
                .iter()
                .filter(|s| s.resource_id == id)
                .map(|s| s.message.as_str())
                .collect();
            let expected: Vec<String> = (0..per_task).map(|i| format!("tick {i}")).collect();
            assert_eq!(messages, expected.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
