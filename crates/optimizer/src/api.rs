//! Read-only HTTP API over the fleet and suggestion state

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use optimizer_lib::{
    health::{components, ComponentStatus, HealthRegistry},
    simulation::history_key,
    DocumentStore, FleetMetrics, FleetRegistry, SuggestionSink,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<FleetRegistry>,
    pub sink: Arc<dyn SuggestionSink>,
    pub store: Arc<dyn DocumentStore>,
    pub health_registry: HealthRegistry,
    pub metrics: FleetMetrics,
}

impl AppState {
    pub fn new(
        registry: Arc<FleetRegistry>,
        sink: Arc<dyn SuggestionSink>,
        store: Arc<dyn DocumentStore>,
        health_registry: HealthRegistry,
        metrics: FleetMetrics,
    ) -> Self {
        Self {
            registry,
            sink,
            store,
            health_registry,
            metrics,
        }
    }
}

/// All current resource snapshots
async fn list_resources(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resources = state.registry.list();
    Json(resources)
}

/// One resource snapshot by id, 404 when unknown
async fn get_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.registry.get(&id) {
        Some(resource) => (StatusCode::OK, Json(json!(resource))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "resource not found"})),
        ),
    }
}

/// Snapshot history for a resource; degrades to empty on store failure
async fn get_resource_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_document(&history_key(&id)).await {
        Ok(Some(history)) => Json(history),
        Ok(None) => Json(Value::Array(Vec::new())),
        Err(error) => {
            warn!(resource_id = %id, error = %error, "History read degraded to empty");
            state
                .health_registry
                .set_degraded(components::SINK, error.to_string())
                .await;
            Json(Value::Array(Vec::new()))
        }
    }
}

/// Current suggestions from the active sink
async fn get_suggestions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let suggestions = state.sink.get_suggestions().await;
    Json(suggestions)
}

/// Clear all stored suggestions; write failures surface as 500
async fn clear_suggestions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.sink.clear_suggestions().await {
        Ok(()) => {
            info!("Suggestions cleared");
            (StatusCode::OK, Json(json!({"message": "suggestions cleared"})))
        }
        Err(error) => {
            state
                .health_registry
                .set_degraded(components::SINK, error.to_string())
                .await;
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": error.to_string()})),
            )
        }
    }
}

/// Which sink backend is active
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({"sink": state.sink.kind()}))
}

/// Health check response - 200 while operational, 503 when unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = if health.status == ComponentStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (status_code, Json(health))
}

/// Readiness check response - 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/resources", get(list_resources))
        .route("/resources/:id", get(get_resource))
        .route("/resources/:id/history", get(get_resource_history))
        .route("/suggestions", get(get_suggestions))
        .route("/suggestions/clear", post(clear_suggestions))
        .route("/status", get(status))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server; shuts down when the broadcast fires
pub async fn serve(
    port: u16,
    state: Arc<AppState>,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    Ok(())
}
