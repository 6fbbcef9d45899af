use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::TtlPolicy;

/// Per-host TTL override as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HostTtl {
    pub host: String,

    /// Milliseconds, so sub-second overrides can be expressed.
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Zero disables the background refresh loop.
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,

    #[serde(default)]
    pub coalesce_misses: bool,

    #[serde(default)]
    pub host_ttl: Vec<HostTtl>,
}

impl CacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    pub fn ttl_policy(&self) -> TtlPolicy {
        self.host_ttl
            .iter()
            .fold(TtlPolicy::new(self.default_ttl()), |policy, entry| {
                policy.with_ttl(&entry.host, Duration::from_millis(entry.ttl_ms))
            })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl_secs(),
            coalesce_misses: false,
            host_ttl: vec![],
        }
    }
}

fn default_ttl_secs() -> u64 {
    60
}
