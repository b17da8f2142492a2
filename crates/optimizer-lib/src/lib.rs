//! Core library for the cloud cost optimizer
//!
//! This crate provides the core functionality for:
//! - The simulated cloud resource fleet and its per-resource update rules
//! - The pure rule-evaluation engine that turns snapshots into suggestions
//! - Suggestion sinks (in-memory and document-store backed)
//! - The abstract document-store seam used for persistence
//! - Health checks and observability

pub mod analyzer;
pub mod fleet;
pub mod health;
pub mod models;
pub mod observability;
pub mod resources;
pub mod simulation;
pub mod sink;
pub mod store;

pub use fleet::FleetRegistry;
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::{Severity, Suggestion};
pub use observability::{FleetLogger, FleetMetrics};
pub use resources::{CloudResource, ResourceKind};
pub use sink::{InMemorySuggestionSink, PersistedSuggestionSink, SinkError, SuggestionSink};
pub use store::{DocumentStore, InMemoryDocumentStore, StoreError};
