//! Threshold rules for block storage volumes and object storage buckets

use super::{base_details, suggest, COST_SPIKE_RATIO, SECONDS_PER_DAY};
use crate::models::{Severity, Suggestion};
use crate::resources::{ResourceKind, Storage, S3};
use chrono::{DateTime, Utc};

const NEARLY_EMPTY_GB: f64 = 1.0;
const OVERSIZED_VOLUME_GB: f64 = 900.0;
const STALE_AFTER_DAYS: i64 = 90;
const EXPENSIVE_VOLUME_COST_PER_GB: f64 = 0.10;

const LARGE_BUCKET_GB: f64 = 1000.0;
const HIGH_OBJECT_COUNT: u64 = 1_000_000;
const EXPENSIVE_BUCKET_COST_PER_GB: f64 = 0.03;

/// Standard-tier object storage rate used as the savings baseline
const STANDARD_TIER_COST_PER_GB: f64 = 0.023;

pub(super) fn evaluate_volume(storage: &Storage, at: DateTime<Utc>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if storage.previous_cost_per_gb > 0.0
        && storage.cost_per_gb > storage.previous_cost_per_gb * COST_SPIKE_RATIO
    {
        let mut details = base_details(
            &storage.owner,
            format!(
                "Per-GB rate for {} rose from ${:.3} to ${:.3}; at {:.0} GB that compounds quickly for {}.",
                storage.id,
                storage.previous_cost_per_gb,
                storage.cost_per_gb,
                storage.used_gb,
                storage.owner
            ),
        );
        details.insert(
            "cost_per_gb".to_string(),
            format!("{:.4}", storage.cost_per_gb),
        );
        details.insert(
            "previous_cost_per_gb".to_string(),
            format!("{:.4}", storage.previous_cost_per_gb),
        );
        suggestions.push(suggest(
            &storage.id,
            ResourceKind::Storage,
            Severity::Critical,
            "Cost spike detected (per-GB rate up more than 50%)",
            "investigate-cost-spike",
            (storage.cost_per_gb - storage.previous_cost_per_gb) * storage.used_gb,
            "https://aws.amazon.com/ebs/pricing/",
            details,
            at,
        ));
    }

    if storage.used_gb < NEARLY_EMPTY_GB {
        let mut details = base_details(
            &storage.owner,
            format!(
                "Volume {} holds under a gigabyte; {} can move it to an infrequent-access tier or drop it entirely.",
                storage.id, storage.owner
            ),
        );
        details.insert("used_gb".to_string(), format!("{:.2}", storage.used_gb));
        suggestions.push(suggest(
            &storage.id,
            ResourceKind::Storage,
            Severity::Warning,
            "Nearly empty volume (used < 1 GB)",
            "move-to-infrequent-access",
            storage.used_gb * storage.cost_per_gb,
            "https://docs.aws.amazon.com/AmazonS3/latest/userguide/storage-class-intro.html",
            details,
            at,
        ));
    }

    if storage.used_gb > OVERSIZED_VOLUME_GB {
        let mut details = base_details(
            &storage.owner,
            format!(
                "Volume {} has grown to {:.0} GB; unchecked growth keeps raising {}'s monthly bill.",
                storage.id, storage.used_gb, storage.owner
            ),
        );
        details.insert("used_gb".to_string(), format!("{:.2}", storage.used_gb));
        suggestions.push(suggest(
            &storage.id,
            ResourceKind::Storage,
            Severity::Critical,
            "Very large volume (used > 900 GB)",
            "clean-up-unused-data",
            (storage.used_gb - OVERSIZED_VOLUME_GB) * storage.cost_per_gb,
            "https://docs.aws.amazon.com/ebs/latest/userguide/ebs-volumes.html",
            details,
            at,
        ));
    }

    let stale_secs = at.timestamp() - storage.last_accessed;
    if stale_secs > STALE_AFTER_DAYS * SECONDS_PER_DAY {
        let mut details = base_details(
            &storage.owner,
            format!(
                "Volume {} has not been read in {} days; archiving it keeps the data while cutting the storage rate.",
                storage.id,
                stale_secs / SECONDS_PER_DAY
            ),
        );
        details.insert(
            "days_since_last_access".to_string(),
            (stale_secs / SECONDS_PER_DAY).to_string(),
        );
        suggestions.push(suggest(
            &storage.id,
            ResourceKind::Storage,
            Severity::Info,
            "Stale volume (not accessed for over 90 days)",
            "archive-or-delete",
            storage.used_gb * storage.cost_per_gb,
            "https://docs.aws.amazon.com/amazonglacier/latest/dev/introduction.html",
            details,
            at,
        ));
    }

    if storage.cost_per_gb > EXPENSIVE_VOLUME_COST_PER_GB {
        let mut details = base_details(
            &storage.owner,
            format!(
                "Volume {} is billed at ${:.3}/GB; a cheaper storage class would serve {}'s access pattern.",
                storage.id, storage.cost_per_gb, storage.owner
            ),
        );
        details.insert(
            "cost_per_gb".to_string(),
            format!("{:.4}", storage.cost_per_gb),
        );
        suggestions.push(suggest(
            &storage.id,
            ResourceKind::Storage,
            Severity::Warning,
            "Expensive storage class (cost > $0.10/GB)",
            "change-storage-class",
            (storage.cost_per_gb - STANDARD_TIER_COST_PER_GB) * storage.used_gb,
            "https://docs.aws.amazon.com/AmazonS3/latest/userguide/storage-class-intro.html",
            details,
            at,
        ));
    }

    suggestions
}

pub(super) fn evaluate_bucket(bucket: &S3, at: DateTime<Utc>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if bucket.used_gb > LARGE_BUCKET_GB {
        let mut details = base_details(
            &bucket.owner,
            format!(
                "Bucket {} stores {:.0} GB; a lifecycle policy would expire cold objects automatically for {}.",
                bucket.id, bucket.used_gb, bucket.owner
            ),
        );
        details.insert("used_gb".to_string(), format!("{:.2}", bucket.used_gb));
        suggestions.push(suggest(
            &bucket.id,
            ResourceKind::S3,
            Severity::Warning,
            "Large bucket (used > 1000 GB)",
            "add-lifecycle-policy",
            (bucket.used_gb - LARGE_BUCKET_GB) * bucket.cost_per_gb,
            "https://docs.aws.amazon.com/AmazonS3/latest/userguide/object-lifecycle-mgmt.html",
            details,
            at,
        ));
    }

    if bucket.object_count > HIGH_OBJECT_COUNT {
        let mut details = base_details(
            &bucket.owner,
            format!(
                "Bucket {} holds {} objects; request and listing costs grow with object count for {}.",
                bucket.id, bucket.object_count, bucket.owner
            ),
        );
        details.insert("object_count".to_string(), bucket.object_count.to_string());
        suggestions.push(suggest(
            &bucket.id,
            ResourceKind::S3,
            Severity::Info,
            "High object count (objects > 1,000,000)",
            "compact-small-objects",
            0.0,
            "https://docs.aws.amazon.com/AmazonS3/latest/userguide/storage-inventory.html",
            details,
            at,
        ));
    }

    if bucket.cost_per_gb > EXPENSIVE_BUCKET_COST_PER_GB {
        let mut details = base_details(
            &bucket.owner,
            format!(
                "Bucket {} is billed at ${:.3}/GB, above the standard tier; {} should review its storage class.",
                bucket.id, bucket.cost_per_gb, bucket.owner
            ),
        );
        details.insert(
            "cost_per_gb".to_string(),
            format!("{:.4}", bucket.cost_per_gb),
        );
        suggestions.push(suggest(
            &bucket.id,
            ResourceKind::S3,
            Severity::Warning,
            "Expensive storage class (cost > $0.03/GB)",
            "review-storage-class",
            (bucket.cost_per_gb - STANDARD_TIER_COST_PER_GB) * bucket.used_gb,
            "https://docs.aws.amazon.com/AmazonS3/latest/userguide/intelligent-tiering.html",
            details,
            at,
        ));
    }

    suggestions
}
