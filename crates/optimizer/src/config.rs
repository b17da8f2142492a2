//! Optimizer configuration

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

/// Suggestion sink backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkBackend {
    Memory,
    Persisted,
}

/// Optimizer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Simulation tick interval in seconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,

    /// Which suggestion sink backend to run
    #[serde(default = "default_sink")]
    pub sink: SinkBackend,

    /// Document-store key holding the suggestion history
    #[serde(default = "default_suggestion_key")]
    pub suggestion_key: String,

    /// Optional TTL on the persisted suggestion document, in seconds
    #[serde(default)]
    pub suggestion_ttl_secs: Option<u64>,
}

fn default_api_port() -> u16 {
    8080
}

fn default_tick_interval() -> u64 {
    1
}

fn default_sink() -> SinkBackend {
    SinkBackend::Persisted
}

fn default_suggestion_key() -> String {
    "suggestions".to_string()
}

impl OptimizerConfig {
    /// Load configuration from the environment (prefix `OPTIMIZER_`)
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("OPTIMIZER"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| OptimizerConfig {
            api_port: default_api_port(),
            tick_interval_secs: default_tick_interval(),
            sink: default_sink(),
            suggestion_key: default_suggestion_key(),
            suggestion_ttl_secs: None,
        }))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn suggestion_ttl(&self) -> Option<Duration> {
        self.suggestion_ttl_secs.map(Duration::from_secs)
    }
}
