//! Simulation driver
//!
//! Spawns one long-lived task per resource. Each task owns its resource
//! instance outright, so mutation needs no locking; the sink, registry and
//! document store are the only shared structures.
//!
//! Tick loop: mutate, publish to the registry, hand the snapshot to the
//! evaluation worker, record history, publish on the output channel,
//! sleep. Evaluations run on a dedicated worker per resource fed by a
//! bounded queue, which keeps per-resource sink writes in FIFO order and
//! guarantees in-flight writes are drained before the task exits.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::analyzer;
use crate::fleet::FleetRegistry;
use crate::observability::{FleetLogger, FleetMetrics};
use crate::resources::{CloudResource, UsageRng};
use crate::sink::SuggestionSink;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Document-store key holding a resource's snapshot history
pub fn history_key(resource_id: &str) -> String {
    format!("resource:{resource_id}:history")
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Sleep between ticks
    pub tick_interval: Duration,
    /// Depth of the per-resource evaluation queue
    pub eval_queue_depth: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            eval_queue_depth: 32,
        }
    }
}

/// Shared collaborators handed to every resource task at startup
#[derive(Clone)]
pub struct FleetContext {
    pub sink: Arc<dyn SuggestionSink>,
    pub registry: Arc<FleetRegistry>,
    pub history: Arc<dyn DocumentStore>,
    pub clock: Arc<dyn Clock>,
    pub metrics: FleetMetrics,
    pub logger: FleetLogger,
}

/// Spawn one simulation task per resource
///
/// Returns the snapshot output stream and the task handles. The stream has
/// capacity one: a slow consumer intentionally throttles the producers.
/// All tasks stop when `shutdown` fires; awaiting the handles guarantees
/// every submitted sink write has landed.
pub fn spawn_fleet(
    resources: Vec<CloudResource>,
    ctx: FleetContext,
    config: SimulationConfig,
    shutdown: &broadcast::Sender<()>,
) -> (mpsc::Receiver<CloudResource>, Vec<JoinHandle<()>>) {
    let (snapshot_tx, snapshot_rx) = mpsc::channel(1);

    ctx.metrics.set_resources_simulated(resources.len() as i64);
    for resource in &resources {
        ctx.registry.publish(resource.clone());
    }

    let handles = resources
        .into_iter()
        .map(|resource| {
            let ctx = ctx.clone();
            let config = config.clone();
            let snapshot_tx = snapshot_tx.clone();
            let shutdown_rx = shutdown.subscribe();
            tokio::spawn(run_resource_task(
                resource,
                ctx,
                config,
                snapshot_tx,
                shutdown_rx,
            ))
        })
        .collect();

    (snapshot_rx, handles)
}

async fn run_resource_task(
    mut resource: CloudResource,
    ctx: FleetContext,
    config: SimulationConfig,
    snapshot_tx: mpsc::Sender<CloudResource>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut rng = UsageRng::seeded_from(resource.id());

    let (eval_tx, eval_rx) = mpsc::channel(config.eval_queue_depth);
    let worker = tokio::spawn(evaluation_worker(
        eval_rx,
        Arc::clone(&ctx.sink),
        ctx.metrics.clone(),
        ctx.logger.clone(),
    ));

    loop {
        let now = ctx.clock.now();
        resource.update_usage(now.timestamp(), &mut rng);
        ctx.registry.publish(resource.clone());
        ctx.metrics.inc_simulation_ticks();

        if eval_tx.send((resource.clone(), now)).await.is_err() {
            break;
        }

        record_history(&ctx, &resource).await;

        tokio::select! {
            sent = snapshot_tx.send(resource.clone()) => {
                if sent.is_err() {
                    break;
                }
            }
            _ = shutdown.recv() => break,
        }

        tokio::select! {
            _ = tokio::time::sleep(config.tick_interval) => {}
            _ = shutdown.recv() => break,
        }
    }

    // Close the queue and wait for submitted evaluations to land
    drop(eval_tx);
    let _ = worker.await;
    debug!(resource_id = %resource.id(), "Resource task stopped");
}

/// Drains the per-resource evaluation queue in submission order
async fn evaluation_worker(
    mut queue: mpsc::Receiver<(CloudResource, DateTime<Utc>)>,
    sink: Arc<dyn SuggestionSink>,
    metrics: FleetMetrics,
    logger: FleetLogger,
) {
    while let Some((snapshot, at)) = queue.recv().await {
        let started = Instant::now();
        let suggestions = analyzer::evaluate(&snapshot, at);
        metrics.observe_evaluation_latency(started.elapsed().as_secs_f64());

        for suggestion in suggestions {
            match sink.add_suggestion(suggestion.clone()).await {
                Ok(()) => {
                    metrics.inc_suggestions_emitted();
                    logger.log_suggestion(&suggestion);
                }
                Err(error) => {
                    metrics.inc_sink_write_errors();
                    warn!(
                        resource_id = %suggestion.resource_id,
                        action = %suggestion.action,
                        error = %error,
                        "Dropping suggestion, sink write failed"
                    );
                }
            }
        }
    }
}

async fn record_history(ctx: &FleetContext, resource: &CloudResource) {
    let snapshot = match serde_json::to_value(resource) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            warn!(resource_id = %resource.id(), error = %error, "Snapshot serialization failed");
            return;
        }
    };
    if let Err(error) = ctx
        .history
        .append_to_array(&history_key(resource.id()), snapshot)
        .await
    {
        debug!(resource_id = %resource.id(), error = %error, "History append failed");
    }
}
