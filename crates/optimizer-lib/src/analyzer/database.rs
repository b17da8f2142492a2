//! Threshold rules for managed databases

use super::{base_details, suggest, COST_SPIKE_RATIO, HOURS_PER_MONTH};
use crate::models::{Severity, Suggestion};
use crate::resources::{Database, ResourceKind};
use chrono::{DateTime, Utc};

const LOW_CONNECTIONS: u32 = 5;
const HIGH_CONNECTIONS: u32 = 150;
const HIGH_CPU_PERCENT: f64 = 70.0;

/// Assumed spend reduction from dropping one instance size
const DOWNSIZE_SAVINGS_RATIO: f64 = 0.5;

pub(super) fn evaluate(db: &Database, at: DateTime<Utc>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if db.previous_cost_per_hour > 0.0
        && db.cost_per_hour > db.previous_cost_per_hour * COST_SPIKE_RATIO
    {
        let mut details = base_details(
            &db.owner,
            format!(
                "Hourly spend for {} jumped from ${:.2} to ${:.2}; {} should confirm the instance class change was intentional.",
                db.id, db.previous_cost_per_hour, db.cost_per_hour, db.owner
            ),
        );
        details.insert(
            "cost_per_hour".to_string(),
            format!("{:.4}", db.cost_per_hour),
        );
        details.insert(
            "previous_cost_per_hour".to_string(),
            format!("{:.4}", db.previous_cost_per_hour),
        );
        suggestions.push(suggest(
            &db.id,
            ResourceKind::Database,
            Severity::Critical,
            "Cost spike detected (hourly rate up more than 50%)",
            "investigate-cost-spike",
            (db.cost_per_hour - db.previous_cost_per_hour) * HOURS_PER_MONTH,
            "https://docs.aws.amazon.com/cost-management/latest/userguide/ce-what-is.html",
            details,
            at,
        ));
    }

    if db.connections < LOW_CONNECTIONS {
        let mut details = base_details(
            &db.owner,
            format!(
                "Database {} serves only {} connections; a smaller instance class would cover {}'s load.",
                db.id, db.connections, db.owner
            ),
        );
        details.insert("connections".to_string(), db.connections.to_string());
        suggestions.push(suggest(
            &db.id,
            ResourceKind::Database,
            Severity::Info,
            "Over-provisioned database (connections < 5)",
            "downsize-database",
            db.cost_per_hour * HOURS_PER_MONTH * DOWNSIZE_SAVINGS_RATIO,
            "https://docs.aws.amazon.com/AmazonRDS/latest/UserGuide/Concepts.DBInstanceClass.html",
            details,
            at,
        ));
    }

    if db.connections > HIGH_CONNECTIONS {
        let mut details = base_details(
            &db.owner,
            format!(
                "Database {} is at {} connections; saturation here degrades every service {} runs against it.",
                db.id, db.connections, db.owner
            ),
        );
        details.insert("connections".to_string(), db.connections.to_string());
        suggestions.push(suggest(
            &db.id,
            ResourceKind::Database,
            Severity::Critical,
            "Connection saturation (connections > 150)",
            "scale-up-or-load-balance",
            0.0,
            "https://docs.aws.amazon.com/AmazonRDS/latest/UserGuide/USER_ReadRepl.html",
            details,
            at,
        ));
    }

    if db.cpu_usage > HIGH_CPU_PERCENT {
        let mut details = base_details(
            &db.owner,
            format!(
                "Database {} runs at {:.1}% CPU; query tuning or an instance upgrade would protect {}'s latency.",
                db.id, db.cpu_usage, db.owner
            ),
        );
        details.insert("cpu_usage".to_string(), format!("{:.2}", db.cpu_usage));
        suggestions.push(suggest(
            &db.id,
            ResourceKind::Database,
            Severity::Warning,
            "High CPU load (CPU > 70%)",
            "optimize-queries-or-upgrade",
            0.0,
            "https://docs.aws.amazon.com/AmazonRDS/latest/UserGuide/USER_PerfInsights.html",
            details,
            at,
        ));
    }

    suggestions
}
