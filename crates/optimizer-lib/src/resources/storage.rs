//! Block storage volume variant

use super::UsageRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    pub id: String,
    pub used_gb: f64,
    pub cost_per_gb: f64,
    pub previous_cost_per_gb: f64,
    /// Unix seconds of the last access
    pub last_accessed: i64,
    pub owner: String,
}

impl Storage {
    pub fn update_usage(&mut self, now: i64, rng: &mut UsageRng) {
        self.used_gb += rng.next_f64() * 2.0;
        self.last_accessed = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_capacity_grows_within_step_bound() {
        let mut storage = Storage {
            id: "s-test".to_string(),
            used_gb: 10.0,
            cost_per_gb: 0.02,
            previous_cost_per_gb: 0.0,
            last_accessed: 0,
            owner: "Data Science".to_string(),
        };
        let mut rng = UsageRng::seeded_from(&storage.id);
        let mut previous = storage.used_gb;
        for tick in 1..=200 {
            storage.update_usage(tick, &mut rng);
            let delta = storage.used_gb - previous;
            assert!((0.0..2.0).contains(&delta));
            assert_eq!(storage.last_accessed, tick);
            previous = storage.used_gb;
        }
    }
}
