//! Cost Optimizer - simulated cloud fleet cost analysis service
//!
//! Runs one simulation task per seeded resource, evaluates cost heuristics
//! against every snapshot, and serves the results over a read-only API.

use anyhow::Result;
use optimizer_lib::{
    health::{components, HealthRegistry},
    resources::seed_fleet,
    simulation::{spawn_fleet, FleetContext, SimulationConfig, SystemClock},
    DocumentStore, FleetLogger, FleetMetrics, FleetRegistry, InMemoryDocumentStore,
    InMemorySuggestionSink, PersistedSuggestionSink, SuggestionSink,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

use crate::config::SinkBackend;

const OPTIMIZER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting cost-optimizer");

    // Load configuration
    let config = config::OptimizerConfig::load()?;
    info!(sink = ?config.sink, tick_interval_secs = config.tick_interval_secs, "Optimizer configured");

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::SIMULATION).await;
    health_registry.register(components::ANALYZER).await;
    health_registry.register(components::SINK).await;
    health_registry.register(components::API).await;

    // Initialize metrics
    let metrics = FleetMetrics::new();

    // Document store backing the persisted sink and snapshot history
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());

    let sink: Arc<dyn SuggestionSink> = match config.sink {
        SinkBackend::Memory => Arc::new(InMemorySuggestionSink::new()),
        SinkBackend::Persisted => Arc::new(
            PersistedSuggestionSink::new(Arc::clone(&store), &config.suggestion_key)
                .with_initial_ttl(config.suggestion_ttl()),
        ),
    };
    metrics.set_sink_info(sink.kind());

    let logger = FleetLogger::new(sink.kind());
    let registry = Arc::new(FleetRegistry::new());
    let clock = Arc::new(SystemClock);

    let resources = seed_fleet(chrono::Utc::now().timestamp());
    logger.log_startup(OPTIMIZER_VERSION, resources.len());

    // Process-wide cancellation signal
    let (shutdown_tx, _) = broadcast::channel(1);

    let ctx = FleetContext {
        sink: Arc::clone(&sink),
        registry: Arc::clone(&registry),
        history: Arc::clone(&store),
        clock,
        metrics: metrics.clone(),
        logger: logger.clone(),
    };
    let sim_config = SimulationConfig {
        tick_interval: config.tick_interval(),
        ..Default::default()
    };
    let (mut snapshots, tasks) = spawn_fleet(resources, ctx, sim_config, &shutdown_tx);

    // Drain the output stream; its pace throttles the simulation
    let drain = tokio::spawn(async move {
        while let Some(snapshot) = snapshots.recv().await {
            info!(
                resource_id = %snapshot.id(),
                kind = %snapshot.kind(),
                usage = snapshot.usage(),
                "Resource state"
            );
        }
    });

    // Start the API server
    let app_state = Arc::new(api::AppState::new(
        registry,
        Arc::clone(&sink),
        store,
        health_registry.clone(),
        metrics.clone(),
    ));
    let api_handle = tokio::spawn(api::serve(
        config.api_port,
        app_state,
        shutdown_tx.subscribe(),
    ));

    // Mark optimizer as ready after startup
    health_registry.set_ready(true).await;

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    let _ = shutdown_tx.send(());

    // Awaiting the task handles guarantees submitted sink writes landed
    for task in tasks {
        let _ = task.await;
    }
    let _ = drain.await;
    let _ = api_handle.await;

    info!("Shutdown complete");
    Ok(())
}
