//! Threshold rules for virtual machines

use super::{base_details, suggest, COST_SPIKE_RATIO, HOURS_PER_MONTH, SECONDS_PER_DAY};
use crate::models::{Severity, Suggestion};
use crate::resources::{ResourceKind, Vm};
use chrono::{DateTime, Utc};

const LOW_CPU_PERCENT: f64 = 10.0;
const HIGH_CPU_PERCENT: f64 = 90.0;
const EXPENSIVE_HOURLY_COST: f64 = 0.5;
const IDLE_AFTER_DAYS: i64 = 30;

/// Flat monthly estimate for retiring a mostly-idle instance
const UNDERUTILIZED_FLAT_SAVINGS: f64 = 30.0;

/// Typical discount when moving on-demand capacity to a commitment plan
const COMMITMENT_DISCOUNT: f64 = 0.3;

pub(super) fn evaluate(vm: &Vm, at: DateTime<Utc>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if vm.previous_cost_per_hour > 0.0
        && vm.cost_per_hour > vm.previous_cost_per_hour * COST_SPIKE_RATIO
    {
        let mut details = base_details(
            &vm.owner,
            format!(
                "Hourly spend for {} jumped from ${:.2} to ${:.2}; unplanned cost growth eats into {}'s budget.",
                vm.id, vm.previous_cost_per_hour, vm.cost_per_hour, vm.owner
            ),
        );
        details.insert(
            "cost_per_hour".to_string(),
            format!("{:.4}", vm.cost_per_hour),
        );
        details.insert(
            "previous_cost_per_hour".to_string(),
            format!("{:.4}", vm.previous_cost_per_hour),
        );
        suggestions.push(suggest(
            &vm.id,
            ResourceKind::Vm,
            Severity::Critical,
            "Cost spike detected (hourly rate up more than 50%)",
            "investigate-cost-spike",
            (vm.cost_per_hour - vm.previous_cost_per_hour) * HOURS_PER_MONTH,
            "https://docs.aws.amazon.com/cost-management/latest/userguide/ce-what-is.html",
            details,
            at,
        ));
    }

    if vm.cpu_usage < LOW_CPU_PERCENT {
        let mut details = base_details(
            &vm.owner,
            format!(
                "Instance {} runs at {:.1}% CPU; {} is paying for capacity that sits idle.",
                vm.id, vm.cpu_usage, vm.owner
            ),
        );
        details.insert("cpu_usage".to_string(), format!("{:.2}", vm.cpu_usage));
        suggestions.push(suggest(
            &vm.id,
            ResourceKind::Vm,
            Severity::Critical,
            "Underutilized VM (CPU < 10%)",
            "downsize-instance",
            UNDERUTILIZED_FLAT_SAVINGS,
            "https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/ec2-instance-resize.html",
            details,
            at,
        ));
    }

    let idle_secs = at.timestamp() - vm.last_active;
    if idle_secs > IDLE_AFTER_DAYS * SECONDS_PER_DAY {
        let mut details = base_details(
            &vm.owner,
            format!(
                "Instance {} has shown no activity for {} days; stopping it removes the full monthly charge.",
                vm.id,
                idle_secs / SECONDS_PER_DAY
            ),
        );
        details.insert(
            "days_since_last_active".to_string(),
            (idle_secs / SECONDS_PER_DAY).to_string(),
        );
        suggestions.push(suggest(
            &vm.id,
            ResourceKind::Vm,
            Severity::Critical,
            "Idle VM (no activity for over 30 days)",
            "stop-or-terminate-instance",
            vm.cost_per_hour * HOURS_PER_MONTH,
            "https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/Stop_Start.html",
            details,
            at,
        ));
    }

    if vm.cpu_usage > HIGH_CPU_PERCENT {
        let mut details = base_details(
            &vm.owner,
            format!(
                "Instance {} is saturated at {:.1}% CPU; sustained load this high risks latency for {}'s workloads.",
                vm.id, vm.cpu_usage, vm.owner
            ),
        );
        details.insert("cpu_usage".to_string(), format!("{:.2}", vm.cpu_usage));
        suggestions.push(suggest(
            &vm.id,
            ResourceKind::Vm,
            Severity::Info,
            "Heavily utilized VM (CPU > 90%)",
            "upgrade-instance",
            0.0,
            "https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/ec2-instance-resize.html",
            details,
            at,
        ));
    }

    if vm.cost_per_hour > EXPENSIVE_HOURLY_COST {
        let mut details = base_details(
            &vm.owner,
            format!(
                "At ${:.2}/hour, {} is a prime candidate for reserved or savings-plan pricing in {}'s account.",
                vm.cost_per_hour, vm.id, vm.owner
            ),
        );
        details.insert(
            "cost_per_hour".to_string(),
            format!("{:.4}", vm.cost_per_hour),
        );
        suggestions.push(suggest(
            &vm.id,
            ResourceKind::Vm,
            Severity::Warning,
            "Expensive VM (hourly cost > $0.50)",
            "switch-pricing-model",
            vm.cost_per_hour * HOURS_PER_MONTH * COMMITMENT_DISCOUNT,
            "https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/instance-purchasing-options.html",
            details,
            at,
        ));
    }

    suggestions
}
