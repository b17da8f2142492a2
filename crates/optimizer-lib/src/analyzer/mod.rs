//! Rule-evaluation engine
//!
//! Maps a resource snapshot to zero or more suggestions. Evaluation is a
//! pure function of the snapshot and the evaluation instant: it never
//! touches shared state, so callers are free to run it on any task.
//!
//! Each variant has an ordered list of independent threshold checks; a
//! single evaluation may emit several suggestions.

mod database;
mod managed;
mod storage;
mod vm;

use crate::models::{Severity, Suggestion};
use crate::resources::{CloudResource, ResourceKind};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

pub(crate) const HOURS_PER_MONTH: f64 = 24.0 * 30.0;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Ratio over the previous rate that counts as a cost spike
pub(crate) const COST_SPIKE_RATIO: f64 = 1.5;

/// Evaluate one snapshot against the variant's rule list
pub fn evaluate(resource: &CloudResource, at: DateTime<Utc>) -> Vec<Suggestion> {
    match resource {
        CloudResource::Vm(r) => vm::evaluate(r, at),
        CloudResource::Storage(r) => storage::evaluate_volume(r, at),
        CloudResource::Database(r) => database::evaluate(r, at),
        CloudResource::S3(r) => storage::evaluate_bucket(r, at),
        CloudResource::DynamoDb(r) => managed::evaluate_table(r, at),
        CloudResource::Lambda(r) => managed::evaluate_function(r, at),
        CloudResource::Elb(r) => managed::evaluate_load_balancer(r, at),
    }
}

/// Assemble a suggestion with the priority derived from its severity
#[allow(clippy::too_many_arguments)]
pub(crate) fn suggest(
    resource_id: &str,
    kind: ResourceKind,
    severity: Severity,
    message: &str,
    action: &str,
    estimated_savings: f64,
    doc_link: &str,
    details: HashMap<String, String>,
    at: DateTime<Utc>,
) -> Suggestion {
    Suggestion {
        resource_id: resource_id.to_string(),
        resource_type: kind,
        message: message.to_string(),
        estimated_savings,
        priority: severity.priority(),
        severity,
        action: action.to_string(),
        details,
        doc_link: doc_link.to_string(),
        timestamp: at,
    }
}

/// Seed the details map with the mandatory owner and business-impact keys
pub(crate) fn base_details(owner: &str, business_impact: String) -> HashMap<String, String> {
    let mut details = HashMap::new();
    details.insert("owner".to_string(), owner.to_string());
    details.insert("business_impact".to_string(), business_impact);
    details
}
