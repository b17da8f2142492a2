//! Static seed data for the simulated fleet

use super::{CloudResource, Database, DynamoDb, Elb, Lambda, Storage, Vm, S3};

/// Build the startup fleet
///
/// `now` seeds the activity timestamps so age-based rules start from a
/// freshly-touched fleet rather than firing on epoch zero.
pub fn seed_fleet(now: i64) -> Vec<CloudResource> {
    vec![
        CloudResource::Vm(Vm {
            id: "vm-1".to_string(),
            cpu_usage: 0.0,
            cost_per_hour: 0.05,
            previous_cost_per_hour: 0.0,
            owner: "Finance Team".to_string(),
            last_active: now,
        }),
        CloudResource::Vm(Vm {
            id: "vm-2".to_string(),
            cpu_usage: 0.0,
            cost_per_hour: 0.10,
            previous_cost_per_hour: 0.0,
            owner: "Engineering".to_string(),
            last_active: now,
        }),
        CloudResource::Storage(Storage {
            id: "s-1".to_string(),
            used_gb: 0.0,
            cost_per_gb: 0.02,
            previous_cost_per_gb: 0.0,
            last_accessed: now,
            owner: "Data Science".to_string(),
        }),
        CloudResource::Database(Database {
            id: "db-1".to_string(),
            connections: 0,
            cpu_usage: 0.0,
            cost_per_hour: 0.20,
            previous_cost_per_hour: 0.0,
            owner: "Analytics".to_string(),
        }),
        CloudResource::S3(S3 {
            id: "s3-1".to_string(),
            used_gb: 500.0,
            object_count: 100_000,
            cost_per_gb: 0.023,
            owner: "Backup".to_string(),
            last_accessed: now,
        }),
        CloudResource::DynamoDb(DynamoDb {
            id: "ddb-1".to_string(),
            read_capacity: 10,
            write_capacity: 5,
            item_count: 10_000,
            cost_per_hour: 0.10,
            owner: "Product".to_string(),
            last_updated: now,
        }),
        CloudResource::Lambda(Lambda {
            id: "lambda-1".to_string(),
            invocations: 1000,
            errors: 2,
            cost_per_million: 0.20,
            owner: "Automation".to_string(),
            last_modified: now,
        }),
        CloudResource::Elb(Elb {
            id: "elb-1".to_string(),
            request_count: 50_000,
            healthy_hosts: 3,
            cost_per_hour: 0.025,
            owner: "WebOps".to_string(),
            last_checked: now,
        }),
    ]
}
