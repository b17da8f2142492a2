//! Virtual machine variant

use super::UsageRng;
use serde::{Deserialize, Serialize};

/// Probability that a tick counts as instance activity
const ACTIVITY_REFRESH_PROBABILITY: f64 = 0.2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vm {
    pub id: String,
    /// CPU utilization in percent, [0, 100)
    pub cpu_usage: f64,
    pub cost_per_hour: f64,
    pub previous_cost_per_hour: f64,
    pub owner: String,
    /// Unix seconds of the last observed activity
    pub last_active: i64,
}

impl Vm {
    pub fn update_usage(&mut self, now: i64, rng: &mut UsageRng) {
        self.cpu_usage = rng.next_f64() * 100.0;
        if rng.next_f64() < ACTIVITY_REFRESH_PROBABILITY {
            self.last_active = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_usage_stays_in_bounds() {
        let mut vm = Vm {
            id: "vm-test".to_string(),
            cpu_usage: 0.0,
            cost_per_hour: 0.05,
            previous_cost_per_hour: 0.0,
            owner: "Finance Team".to_string(),
            last_active: 0,
        };
        let mut rng = UsageRng::seeded_from(&vm.id);
        for tick in 0..500 {
            vm.update_usage(tick, &mut rng);
            assert!((0.0..100.0).contains(&vm.cpu_usage));
        }
    }

    #[test]
    fn test_last_active_refreshes_occasionally() {
        let mut vm = Vm {
            id: "vm-test".to_string(),
            cpu_usage: 0.0,
            cost_per_hour: 0.05,
            previous_cost_per_hour: 0.0,
            owner: "Finance Team".to_string(),
            last_active: 0,
        };
        let mut rng = UsageRng::seeded_from(&vm.id);
        for tick in 1..=500 {
            vm.update_usage(tick, &mut rng);
        }
        // With p=0.2 per tick, 500 ticks refresh with near certainty
        assert!(vm.last_active > 0);
    }
}
