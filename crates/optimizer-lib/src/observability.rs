//! Observability infrastructure for the cost optimizer
//!
//! Provides:
//! - Prometheus metrics (tick throughput, evaluation latency, sink health)
//! - Structured JSON logging of fleet lifecycle events with tracing

use crate::models::{Severity, Suggestion};
use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, register_int_gauge, GaugeVec,
    Histogram, IntCounter, IntGauge,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for evaluation latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<FleetMetricsInner> = OnceLock::new();

struct FleetMetricsInner {
    simulation_ticks: IntCounter,
    suggestions_emitted: IntCounter,
    sink_write_errors: IntCounter,
    evaluation_latency_seconds: Histogram,
    resources_simulated: IntGauge,
    sink_info: GaugeVec,
}

impl FleetMetricsInner {
    fn new() -> Self {
        Self {
            simulation_ticks: register_int_counter!(
                "cost_optimizer_simulation_ticks_total",
                "Total simulation ticks across all resource tasks"
            )
            .expect("Failed to register simulation_ticks_total"),

            suggestions_emitted: register_int_counter!(
                "cost_optimizer_suggestions_emitted_total",
                "Total suggestions accepted by the sink"
            )
            .expect("Failed to register suggestions_emitted_total"),

            sink_write_errors: register_int_counter!(
                "cost_optimizer_sink_write_errors_total",
                "Total suggestion writes dropped due to sink failures"
            )
            .expect("Failed to register sink_write_errors_total"),

            evaluation_latency_seconds: register_histogram!(
                "cost_optimizer_evaluation_latency_seconds",
                "Time spent evaluating one resource snapshot",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register evaluation_latency_seconds"),

            resources_simulated: register_int_gauge!(
                "cost_optimizer_resources_simulated",
                "Number of resources currently being simulated"
            )
            .expect("Failed to register resources_simulated"),

            sink_info: register_gauge_vec!(
                "cost_optimizer_sink_info",
                "Information about the active suggestion sink",
                &["backend"]
            )
            .expect("Failed to register sink_info"),
        }
    }
}

/// Fleet metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct FleetMetrics {
    _private: (),
}

impl Default for FleetMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(FleetMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &FleetMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn inc_simulation_ticks(&self) {
        self.inner().simulation_ticks.inc();
    }

    pub fn inc_suggestions_emitted(&self) {
        self.inner().suggestions_emitted.inc();
    }

    pub fn inc_sink_write_errors(&self) {
        self.inner().sink_write_errors.inc();
    }

    pub fn observe_evaluation_latency(&self, duration_secs: f64) {
        self.inner()
            .evaluation_latency_seconds
            .observe(duration_secs);
    }

    pub fn set_resources_simulated(&self, count: i64) {
        self.inner().resources_simulated.set(count);
    }

    /// Record which sink backend is active
    pub fn set_sink_info(&self, backend: &str) {
        self.inner().sink_info.reset();
        self.inner().sink_info.with_label_values(&[backend]).set(1.0);
    }
}

/// Structured logger for fleet lifecycle events
#[derive(Clone)]
pub struct FleetLogger {
    sink_backend: String,
}

impl FleetLogger {
    pub fn new(sink_backend: impl Into<String>) -> Self {
        Self {
            sink_backend: sink_backend.into(),
        }
    }

    pub fn log_startup(&self, version: &str, resource_count: usize) {
        info!(
            event = "optimizer_started",
            version = %version,
            sink = %self.sink_backend,
            resources = resource_count,
            "Cost optimizer started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "optimizer_shutdown",
            sink = %self.sink_backend,
            reason = %reason,
            "Cost optimizer shutting down"
        );
    }

    /// Log an accepted suggestion; critical findings are warned
    pub fn log_suggestion(&self, suggestion: &Suggestion) {
        match suggestion.severity {
            Severity::Critical => {
                warn!(
                    event = "suggestion_emitted",
                    resource_id = %suggestion.resource_id,
                    resource_type = %suggestion.resource_type,
                    severity = %suggestion.severity,
                    action = %suggestion.action,
                    estimated_savings = suggestion.estimated_savings,
                    "Critical cost suggestion"
                );
            }
            _ => {
                info!(
                    event = "suggestion_emitted",
                    resource_id = %suggestion.resource_id,
                    resource_type = %suggestion.resource_type,
                    severity = %suggestion.severity,
                    action = %suggestion.action,
                    estimated_savings = suggestion.estimated_savings,
                    "Cost suggestion"
                );
            }
        }
    }

    pub fn log_sink_degraded(&self, error: &str) {
        warn!(
            event = "sink_degraded",
            sink = %self.sink_backend,
            error = %error,
            "Suggestion sink degraded"
        );
    }
}
