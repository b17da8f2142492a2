//! Core data models for the cost optimizer

use crate::resources::ResourceKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Severity of a cost-optimization suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Immediate action recommended
    Critical,
    /// Worth addressing soon
    Warning,
    /// Informational, review at leisure
    Info,
}

impl Severity {
    /// Numeric priority, lower is more urgent (Critical=1 .. Info=3)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Critical => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A cost or operational recommendation derived from one resource snapshot
///
/// Immutable once created: sinks only append or bulk-clear, never edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub resource_id: String,
    pub resource_type: ResourceKind,
    pub message: String,
    /// Estimated USD savings per month if the action is taken
    pub estimated_savings: f64,
    pub severity: Severity,
    /// Numeric priority mirroring the severity (1=Critical .. 3=Info)
    pub priority: u8,
    /// Machine-friendly recommended action slug
    pub action: String,
    /// Contextual details: owner, business impact, triggering metric values
    pub details: HashMap<String, String>,
    /// Documentation link relevant to the remediation action
    pub doc_link: String,
    pub timestamp: DateTime<Utc>,
}

impl Suggestion {
    /// Key used by persisted sinks to suppress exact duplicates
    pub fn dedup_key(&self) -> (&str, &str, ResourceKind, &str) {
        (
            self.resource_id.as_str(),
            self.action.as_str(),
            self.resource_type,
            self.message.as_str(),
        )
    }
}
