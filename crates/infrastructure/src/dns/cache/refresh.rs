use super::storage::HostCache;
use std::sync::Arc;
use tokio::time::Instant;

/// Extension methods for HostCache refresh functionality
impl HostCache {
    /// Hosts whose record expired before `now`.
    ///
    /// Collected into an owned list so every shard lock is released before
    /// the caller starts resolving.
    pub fn expired_hosts(&self, now: Instant) -> Vec<Arc<str>> {
        self.entries
            .iter()
            .filter(|entry| entry.value().is_expired_at(now))
            .map(|entry| Arc::clone(entry.key()))
            .collect()
    }
}
