//! Threshold rules for DynamoDB tables, Lambda functions and load balancers

use super::{base_details, suggest, HOURS_PER_MONTH};
use crate::models::{Severity, Suggestion};
use crate::resources::{DynamoDb, Elb, Lambda, ResourceKind};
use chrono::{DateTime, Utc};

const HIGH_PROVISIONED_CAPACITY: u32 = 20;
const LARGE_TABLE_ITEMS: u64 = 1_000_000;
const EXPENSIVE_TABLE_COST_PER_HOUR: f64 = 0.25;

const HIGH_ERROR_RATE: f64 = 0.05;
const LOW_INVOCATIONS: u64 = 100;
const EXPENSIVE_COST_PER_MILLION: f64 = 0.25;
/// On-demand baseline rate per million invocations
const BASELINE_COST_PER_MILLION: f64 = 0.20;

const LOW_REQUEST_COUNT: u64 = 1000;
const MIN_HEALTHY_HOSTS: u32 = 2;
const EXPENSIVE_COST_PER_REQUEST: f64 = 0.000_05;

pub(super) fn evaluate_table(table: &DynamoDb, at: DateTime<Utc>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if table.read_capacity > HIGH_PROVISIONED_CAPACITY
        || table.write_capacity > HIGH_PROVISIONED_CAPACITY
    {
        let mut details = base_details(
            &table.owner,
            format!(
                "Table {} provisions {}/{} read/write units around the clock; on-demand billing would track {}'s actual traffic.",
                table.id, table.read_capacity, table.write_capacity, table.owner
            ),
        );
        details.insert("read_capacity".to_string(), table.read_capacity.to_string());
        details.insert(
            "write_capacity".to_string(),
            table.write_capacity.to_string(),
        );
        suggestions.push(suggest(
            &table.id,
            ResourceKind::DynamoDb,
            Severity::Warning,
            "High provisioned capacity (read or write capacity > 20 units)",
            "switch-to-on-demand-capacity",
            table.cost_per_hour * HOURS_PER_MONTH * 0.2,
            "https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/HowItWorks.ReadWriteCapacityMode.html",
            details,
            at,
        ));
    }

    if table.item_count > LARGE_TABLE_ITEMS {
        let mut details = base_details(
            &table.owner,
            format!(
                "Table {} holds {} items; expiring or archiving old records keeps {}'s storage bill flat.",
                table.id, table.item_count, table.owner
            ),
        );
        details.insert("item_count".to_string(), table.item_count.to_string());
        suggestions.push(suggest(
            &table.id,
            ResourceKind::DynamoDb,
            Severity::Info,
            "Very large table (item count > 1,000,000)",
            "archive-old-items",
            0.0,
            "https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/TTL.html",
            details,
            at,
        ));
    }

    if table.cost_per_hour > EXPENSIVE_TABLE_COST_PER_HOUR {
        let mut details = base_details(
            &table.owner,
            format!(
                "Table {} costs ${:.2}/hour; {} should check whether provisioned throughput matches demand.",
                table.id, table.cost_per_hour, table.owner
            ),
        );
        details.insert(
            "cost_per_hour".to_string(),
            format!("{:.4}", table.cost_per_hour),
        );
        suggestions.push(suggest(
            &table.id,
            ResourceKind::DynamoDb,
            Severity::Warning,
            "Expensive table (cost > $0.25/hour)",
            "review-table-capacity",
            (table.cost_per_hour - EXPENSIVE_TABLE_COST_PER_HOUR) * HOURS_PER_MONTH,
            "https://aws.amazon.com/dynamodb/pricing/",
            details,
            at,
        ));
    }

    suggestions
}

pub(super) fn evaluate_function(function: &Lambda, at: DateTime<Utc>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    // Rate rule needs a non-zero denominator
    if function.invocations > 0 {
        let error_rate = function.errors as f64 / function.invocations as f64;
        if error_rate > HIGH_ERROR_RATE {
            let mut details = base_details(
                &function.owner,
                format!(
                    "Function {} fails on {:.1}% of invocations; every failed call is billed but produces nothing for {}.",
                    function.id,
                    error_rate * 100.0,
                    function.owner
                ),
            );
            details.insert("error_rate".to_string(), format!("{:.4}", error_rate));
            details.insert("errors".to_string(), function.errors.to_string());
            details.insert("invocations".to_string(), function.invocations.to_string());
            suggestions.push(suggest(
                &function.id,
                ResourceKind::Lambda,
                Severity::Warning,
                "High error rate (errors > 5% of invocations)",
                "investigate-function-errors",
                function.errors as f64 * function.cost_per_million / 1_000_000.0,
                "https://docs.aws.amazon.com/lambda/latest/dg/monitoring-functions.html",
                details,
                at,
            ));
        }
    }

    if function.invocations < LOW_INVOCATIONS {
        let mut details = base_details(
            &function.owner,
            format!(
                "Function {} saw {} invocations; {} should confirm it is still needed before it bit-rots.",
                function.id, function.invocations, function.owner
            ),
        );
        details.insert("invocations".to_string(), function.invocations.to_string());
        suggestions.push(suggest(
            &function.id,
            ResourceKind::Lambda,
            Severity::Info,
            "Rarely invoked function (invocations < 100)",
            "review-idle-function",
            function.invocations as f64 * function.cost_per_million / 1_000_000.0,
            "https://docs.aws.amazon.com/lambda/latest/dg/best-practices.html",
            details,
            at,
        ));
    }

    if function.cost_per_million > EXPENSIVE_COST_PER_MILLION {
        let mut details = base_details(
            &function.owner,
            format!(
                "Function {} is billed at ${:.2} per million invocations; memory right-sizing usually brings {}'s rate down.",
                function.id, function.cost_per_million, function.owner
            ),
        );
        details.insert(
            "cost_per_million".to_string(),
            format!("{:.4}", function.cost_per_million),
        );
        suggestions.push(suggest(
            &function.id,
            ResourceKind::Lambda,
            Severity::Warning,
            "Expensive function (cost > $0.25 per million invocations)",
            "optimize-function-cost",
            (function.cost_per_million - BASELINE_COST_PER_MILLION) * function.invocations as f64
                / 1_000_000.0,
            "https://docs.aws.amazon.com/lambda/latest/operatorguide/computing-power.html",
            details,
            at,
        ));
    }

    suggestions
}

pub(super) fn evaluate_load_balancer(elb: &Elb, at: DateTime<Utc>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if elb.request_count < LOW_REQUEST_COUNT {
        let mut details = base_details(
            &elb.owner,
            format!(
                "Load balancer {} served {} requests; {} could consolidate it with another listener and save its fixed hourly fee.",
                elb.id, elb.request_count, elb.owner
            ),
        );
        details.insert("request_count".to_string(), elb.request_count.to_string());
        suggestions.push(suggest(
            &elb.id,
            ResourceKind::Elb,
            Severity::Info,
            "Underutilized load balancer (requests < 1000)",
            "consolidate-or-remove-load-balancer",
            elb.cost_per_hour * HOURS_PER_MONTH,
            "https://aws.amazon.com/elasticloadbalancing/pricing/",
            details,
            at,
        ));
    }

    if elb.healthy_hosts < MIN_HEALTHY_HOSTS {
        let mut details = base_details(
            &elb.owner,
            format!(
                "Load balancer {} has {} healthy targets; {} is one host failure away from an outage.",
                elb.id, elb.healthy_hosts, elb.owner
            ),
        );
        details.insert("healthy_hosts".to_string(), elb.healthy_hosts.to_string());
        suggestions.push(suggest(
            &elb.id,
            ResourceKind::Elb,
            Severity::Warning,
            "Low healthy host count (healthy hosts < 2)",
            "add-healthy-targets",
            0.0,
            "https://docs.aws.amazon.com/elasticloadbalancing/latest/application/target-group-health-checks.html",
            details,
            at,
        ));
    }

    // Rate rule is skipped outright when no requests were served
    if elb.request_count > 0 {
        let cost_per_request = elb.cost_per_hour / elb.request_count as f64;
        if cost_per_request > EXPENSIVE_COST_PER_REQUEST {
            let mut details = base_details(
                &elb.owner,
                format!(
                    "Load balancer {} costs ${:.6} per request served; the fixed fee dominates {}'s low traffic.",
                    elb.id, cost_per_request, elb.owner
                ),
            );
            details.insert(
                "cost_per_request".to_string(),
                format!("{:.8}", cost_per_request),
            );
            details.insert("request_count".to_string(), elb.request_count.to_string());
            suggestions.push(suggest(
                &elb.id,
                ResourceKind::Elb,
                Severity::Warning,
                "High cost per request (> $0.00005)",
                "review-load-balancer-utilization",
                elb.cost_per_hour * HOURS_PER_MONTH * 0.5,
                "https://docs.aws.amazon.com/elasticloadbalancing/latest/userguide/how-elastic-load-balancing-works.html",
                details,
                at,
            ));
        }
    }

    suggestions
}
