use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Expiry policy for cached hosts.
///
/// Holds a process-wide default TTL plus per-host overrides. `min_ttl` tracks
/// the smallest configured duration and only ever decreases, since overrides
/// are never removed.
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    default_ttl: Duration,
    min_ttl: Duration,
    overrides: HashMap<Arc<str>, Duration>,
}

impl TtlPolicy {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            min_ttl: default_ttl,
            overrides: HashMap::new(),
        }
    }

    /// Registers an override for `host`. A zero TTL is allowed and means the
    /// entry is stale as soon as it is written.
    pub fn set_ttl(&mut self, host: &str, ttl: Duration) {
        self.overrides.insert(Arc::from(host), ttl);
        if ttl < self.min_ttl {
            self.min_ttl = ttl;
        }
    }

    pub fn with_ttl(mut self, host: &str, ttl: Duration) -> Self {
        self.set_ttl(host, ttl);
        self
    }

    #[inline]
    pub fn ttl_for(&self, host: &str) -> Duration {
        self.overrides
            .get(host)
            .copied()
            .unwrap_or(self.default_ttl)
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn min_ttl(&self) -> Duration {
        self.min_ttl
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.overrides.iter().map(|(host, ttl)| (host.as_ref(), *ttl))
    }

    /// Background refresh only runs when a non-zero default TTL is configured.
    pub fn refresh_enabled(&self) -> bool {
        !self.default_ttl.is_zero()
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
