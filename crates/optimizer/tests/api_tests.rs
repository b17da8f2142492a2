//! Integration tests for the optimizer API endpoints

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use optimizer_lib::{
    health::{components, ComponentStatus, HealthRegistry},
    resources::seed_fleet,
    simulation::history_key,
    DocumentStore, FleetRegistry, InMemoryDocumentStore, InMemorySuggestionSink, ResourceKind,
    Severity, Suggestion, SuggestionSink,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Clone)]
struct AppState {
    registry: Arc<FleetRegistry>,
    sink: Arc<dyn SuggestionSink>,
    store: Arc<dyn DocumentStore>,
    health_registry: HealthRegistry,
}

async fn list_resources(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.registry.list())
}

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

async fn get_resource_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_document(&history_key(&id)).await {
        Ok(Some(history)) => Json(history),
        _ => Json(Value::Array(Vec::new())),
    }
}

async fn get_suggestions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.sink.get_suggestions().await)
}

async fn clear_suggestions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.sink.clear_suggestions().await {
        Ok(()) => (StatusCode::OK, Json(json!({"message": "suggestions cleared"}))),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": error.to_string()})),
        ),
    }
}

async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({"sink": state.sink.kind()}))
}

async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;
    let status_code = if health.status == ComponentStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status_code, Json(health))
}

fn create_test_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/resources", get(list_resources))
        .route("/resources/:id", get(get_resource))
        .route("/resources/:id/history", get(get_resource_history))
        .route("/suggestions", get(get_suggestions))
        .route("/suggestions/clear", post(clear_suggestions))
        .route("/status", get(status))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn setup_test_app() -> (Router, Arc<AppState>) {
    let registry = Arc::new(FleetRegistry::new());
    for resource in seed_fleet(Utc::now().timestamp()) {
        registry.publish(resource);
    }

    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    let sink: Arc<dyn SuggestionSink> = Arc::new(InMemorySuggestionSink::new());
    let health_registry = HealthRegistry::new();
    health_registry.register(components::SINK).await;

    let state = Arc::new(AppState {
        registry,
        sink,
        store,
        health_registry,
    });
    let router = create_test_router(state.clone());

    (router, state)
}

fn sample_suggestion() -> Suggestion {
    let mut details = HashMap::new();
    details.insert("owner".to_string(), "Finance Team".to_string());
    details.insert("business_impact".to_string(), "Idle spend".to_string());

    Suggestion {
        resource_id: "vm-1".to_string(),
        resource_type: ResourceKind::Vm,
        message: "Underutilized VM (CPU < 10%)".to_string(),
        estimated_savings: 30.0,
        severity: Severity::Critical,
        priority: 1,
        action: "downsize-instance".to_string(),
        details,
        doc_link: "https://example.com".to_string(),
        timestamp: Utc::now(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_list_resources_returns_full_fleet() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/resources")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let resources = body_json(response).await;
    assert_eq!(resources.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_get_resource_by_id() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/resources/vm-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let resource = body_json(response).await;
    assert_eq!(resource["id"], "vm-1");
    assert_eq!(resource["kind"], "VM");
}

#[tokio::test]
async fn test_get_unknown_resource_is_404() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/resources/vm-404")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["error"], "resource not found");
}

#[tokio::test]
async fn test_history_reads_recorded_snapshots() {
    let (app, state) = setup_test_app().await;

    let snapshot = serde_json::to_value(state.registry.get("vm-1").unwrap()).unwrap();
    state
        .store
        .append_to_array(&history_key("vm-1"), snapshot)
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/resources/vm-1/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let history = body_json(response).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["id"], "vm-1");
}

#[tokio::test]
async fn test_history_for_unknown_resource_is_empty() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/resources/ghost/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_suggestions_roundtrip_through_sink() {
    let (app, state) = setup_test_app().await;
    state.sink.add_suggestion(sample_suggestion()).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/suggestions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let suggestions = body_json(response).await;
    assert_eq!(suggestions.as_array().unwrap().len(), 1);
    assert_eq!(suggestions[0]["resource_id"], "vm-1");
    assert_eq!(suggestions[0]["severity"], "critical");
    assert_eq!(suggestions[0]["priority"], 1);
}

#[tokio::test]
async fn test_clear_empties_suggestions() {
    let (app, state) = setup_test_app().await;
    state.sink.add_suggestion(sample_suggestion()).await.unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/suggestions/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/suggestions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_status_reports_active_sink() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"sink": "memory"}));
}

#[tokio::test]
async fn test_healthz_degrades_but_stays_operational() {
    let (app, state) = setup_test_app().await;

    state
        .health_registry
        .set_degraded(components::SINK, "store unavailable")
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "degraded");
}

#[tokio::test]
async fn test_healthz_returns_503_when_unhealthy() {
    let (app, state) = setup_test_app().await;

    state
        .health_registry
        .set_unhealthy(components::SINK, "store gone")
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
