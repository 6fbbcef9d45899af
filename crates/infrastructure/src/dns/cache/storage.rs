use super::{CacheMetrics, CacheStats, CachedHost};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::Arc;
use tracing::debug;

/// Host name to resolution record.
///
/// Sharded reader/writer locks: hits on different hosts never contend, and
/// hits on the same host only share a read lock. Guards are dropped before
/// any method returns, so no lock is ever held across a resolution.
pub struct HostCache {
    pub(super) entries: DashMap<Arc<str>, Arc<CachedHost>, FxBuildHasher>,
    pub(super) metrics: CacheMetrics,
}

impl HostCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            metrics: CacheMetrics::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup that counts towards hit/miss metrics. Expired entries are still
    /// returned; staleness is the refresh pass's concern.
    pub fn get(&self, host: &str) -> Option<Arc<CachedHost>> {
        match self.peek(host) {
            Some(entry) => {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                debug!(host = %host, "Cache HIT");
                Some(entry)
            }
            None => {
                self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
                debug!(host = %host, "Cache MISS");
                None
            }
        }
    }

    /// Lookup without touching metrics.
    pub fn peek(&self, host: &str) -> Option<Arc<CachedHost>> {
        self.entries.get(host).map(|entry| Arc::clone(entry.value()))
    }

    /// Replaces the host's record. Last writer wins.
    pub fn insert(&self, host: &str, record: Arc<CachedHost>) {
        let count = record.addresses.len();
        self.entries.insert(Arc::from(host), record);
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);

        debug!(host = %host, addresses = count, "Inserted record into cache");
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len())
    }
}

impl Default for HostCache {
    fn default() -> Self {
        Self::new()
    }
}
