//! Simulated cloud resource variants
//!
//! Each variant owns its mutable utilization fields and a deterministic
//! update rule driven by the update instant and a seeded pseudo-random
//! source. `update_usage` is the only mutator and is confined to the
//! simulation task that owns the resource instance.

mod database;
mod managed;
mod seed;
mod storage;
mod vm;

pub use database::Database;
pub use managed::{DynamoDb, Elb, Lambda, S3};
pub use seed::seed_fleet;
pub use storage::Storage;
pub use vm::Vm;

use serde::{Deserialize, Serialize};

/// Resource variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "VM")]
    Vm,
    Storage,
    Database,
    S3,
    #[serde(rename = "DynamoDB")]
    DynamoDb,
    Lambda,
    #[serde(rename = "ELB")]
    Elb,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Vm => "VM",
            ResourceKind::Storage => "Storage",
            ResourceKind::Database => "Database",
            ResourceKind::S3 => "S3",
            ResourceKind::DynamoDb => "DynamoDB",
            ResourceKind::Lambda => "Lambda",
            ResourceKind::Elb => "ELB",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A simulated cloud asset instance
///
/// Tagged union over the variants so rule dispatch stays exhaustive at
/// compile time. Serializes with the variant tag inlined as `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CloudResource {
    #[serde(rename = "VM")]
    Vm(Vm),
    Storage(Storage),
    Database(Database),
    S3(S3),
    #[serde(rename = "DynamoDB")]
    DynamoDb(DynamoDb),
    Lambda(Lambda),
    #[serde(rename = "ELB")]
    Elb(Elb),
}

impl CloudResource {
    /// Stable identifier, unique within a simulation run
    pub fn id(&self) -> &str {
        match self {
            CloudResource::Vm(r) => &r.id,
            CloudResource::Storage(r) => &r.id,
            CloudResource::Database(r) => &r.id,
            CloudResource::S3(r) => &r.id,
            CloudResource::DynamoDb(r) => &r.id,
            CloudResource::Lambda(r) => &r.id,
            CloudResource::Elb(r) => &r.id,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            CloudResource::Vm(_) => ResourceKind::Vm,
            CloudResource::Storage(_) => ResourceKind::Storage,
            CloudResource::Database(_) => ResourceKind::Database,
            CloudResource::S3(_) => ResourceKind::S3,
            CloudResource::DynamoDb(_) => ResourceKind::DynamoDb,
            CloudResource::Lambda(_) => ResourceKind::Lambda,
            CloudResource::Elb(_) => ResourceKind::Elb,
        }
    }

    /// Headline utilization metric for the variant
    pub fn usage(&self) -> f64 {
        match self {
            CloudResource::Vm(r) => r.cpu_usage,
            CloudResource::Storage(r) => r.used_gb,
            CloudResource::Database(r) => f64::from(r.connections),
            CloudResource::S3(r) => r.used_gb,
            CloudResource::DynamoDb(r) => r.item_count as f64,
            CloudResource::Lambda(r) => r.invocations as f64,
            CloudResource::Elb(r) => r.request_count as f64,
        }
    }

    /// Owning team tag carried into suggestion details
    pub fn owner(&self) -> &str {
        match self {
            CloudResource::Vm(r) => &r.owner,
            CloudResource::Storage(r) => &r.owner,
            CloudResource::Database(r) => &r.owner,
            CloudResource::S3(r) => &r.owner,
            CloudResource::DynamoDb(r) => &r.owner,
            CloudResource::Lambda(r) => &r.owner,
            CloudResource::Elb(r) => &r.owner,
        }
    }

    /// Advance the resource one simulation tick
    ///
    /// `now` is the update instant as unix seconds; all time-derived deltas
    /// are pure functions of it so a fixed clock yields assertable values.
    pub fn update_usage(&mut self, now: i64, rng: &mut UsageRng) {
        match self {
            CloudResource::Vm(r) => r.update_usage(now, rng),
            CloudResource::Storage(r) => r.update_usage(now, rng),
            CloudResource::Database(r) => r.update_usage(rng),
            CloudResource::S3(r) => r.update_usage(now),
            CloudResource::DynamoDb(r) => r.update_usage(now),
            CloudResource::Lambda(r) => r.update_usage(now),
            CloudResource::Elb(r) => r.update_usage(now),
        }
    }
}

/// Deterministic pseudo-random source for utilization updates
///
/// SplitMix64 seeded from the resource id, so each resource replays the
/// same usage trajectory for a given seed and tick count.
#[derive(Debug, Clone)]
pub struct UsageRng {
    state: u64,
}

impl UsageRng {
    /// Seed from a resource id (FNV-1a over the bytes)
    pub fn seeded_from(id: &str) -> Self {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in id.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        Self::with_seed(hash)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in [0, bound)
    pub fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.next_u64() % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_is_deterministic_per_seed() {
        let mut a = UsageRng::seeded_from("vm-1");
        let mut b = UsageRng::seeded_from("vm-1");
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_rng_f64_bounds() {
        let mut rng = UsageRng::with_seed(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_rng_next_below_bounds() {
        let mut rng = UsageRng::with_seed(7);
        for _ in 0..1000 {
            assert!(rng.next_below(30) < 30);
        }
        assert_eq!(rng.next_below(0), 0);
    }

    #[test]
    fn test_kind_tag_serialization() {
        let resource = CloudResource::DynamoDb(DynamoDb {
            id: "ddb-1".to_string(),
            read_capacity: 10,
            write_capacity: 5,
            item_count: 100,
            cost_per_hour: 0.1,
            owner: "Product".to_string(),
            last_updated: 0,
        });
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["kind"], "DynamoDB");
        assert_eq!(value["id"], "ddb-1");
    }
}
