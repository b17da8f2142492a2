//! Shared registry of current resource state
//!
//! Each simulation task publishes its own resource's latest snapshot here
//! after every tick; the read-only API serves queries from it. No task
//! reads or writes another task's entry, so the map's internal sharding is
//! the only coordination needed.

use crate::resources::CloudResource;
use dashmap::DashMap;

/// Map of resource id to its latest published snapshot
#[derive(Default)]
pub struct FleetRegistry {
    resources: DashMap<String, CloudResource>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self {
            resources: DashMap::new(),
        }
    }

    /// Publish the latest snapshot for a resource
    pub fn publish(&self, snapshot: CloudResource) {
        self.resources.insert(snapshot.id().to_string(), snapshot);
    }

    pub fn get(&self, resource_id: &str) -> Option<CloudResource> {
        self.resources.get(resource_id).map(|entry| entry.clone())
    }

    /// All current snapshots, ordered by id for stable output
    pub fn list(&self) -> Vec<CloudResource> {
        let mut snapshots: Vec<CloudResource> =
            self.resources.iter().map(|entry| entry.value().clone()).collect();
        snapshots.sort_by(|a, b| a.id().cmp(b.id()));
        snapshots
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
