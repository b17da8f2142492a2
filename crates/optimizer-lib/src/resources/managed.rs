//! Managed service variants with time-derived update rules
//!
//! These variants derive every delta from the update instant alone, so a
//! fixed clock makes each tick exactly reproducible.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3 {
    pub id: String,
    pub used_gb: f64,
    pub object_count: u64,
    pub cost_per_gb: f64,
    pub owner: String,
    pub last_accessed: i64,
}

impl S3 {
    pub fn update_usage(&mut self, now: i64) {
        self.used_gb += 1.0 + (now % 10) as f64 / 10.0;
        self.object_count += 100 + (now % 20) as u64;
        self.last_accessed = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamoDb {
    pub id: String,
    pub read_capacity: u32,
    pub write_capacity: u32,
    pub item_count: u64,
    pub cost_per_hour: f64,
    pub owner: String,
    pub last_updated: i64,
}

impl DynamoDb {
    pub fn update_usage(&mut self, now: i64) {
        self.item_count += 100 + (now % 30) as u64;
        self.last_updated = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lambda {
    pub id: String,
    pub invocations: u64,
    pub errors: u64,
    /// USD per million invocations
    pub cost_per_million: f64,
    pub owner: String,
    pub last_modified: i64,
}

impl Lambda {
    pub fn update_usage(&mut self, now: i64) {
        self.invocations += 100 + (now % 50) as u64;
        self.errors += (now % 3) as u64;
        self.last_modified = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elb {
    pub id: String,
    pub request_count: u64,
    pub healthy_hosts: u32,
    pub cost_per_hour: f64,
    pub owner: String,
    pub last_checked: i64,
}

impl Elb {
    pub fn update_usage(&mut self, now: i64) {
        self.request_count += 1000 + (now % 100) as u64;
        self.healthy_hosts = 2 + (now % 3) as u32;
        self.last_checked = now;
    }
}
