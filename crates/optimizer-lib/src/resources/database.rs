//! Managed database variant

use super::UsageRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    /// Active connection count, [0, 200)
    pub connections: u32,
    /// CPU utilization in percent, [0, 80)
    pub cpu_usage: f64,
    pub cost_per_hour: f64,
    pub previous_cost_per_hour: f64,
    pub owner: String,
}

impl Database {
    pub fn update_usage(&mut self, rng: &mut UsageRng) {
        self.connections = rng.next_below(200) as u32;
        self.cpu_usage = rng.next_f64() * 80.0;
    }
}
