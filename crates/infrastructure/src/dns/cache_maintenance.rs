use super::resolver::CachingResolver;

use async_trait::async_trait;
use hostcache_application::ports::{CacheMaintenancePort, CacheRefreshOutcome};
use hostcache_domain::DomainError;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Pause between two refreshes in the same cycle, so a burst of stale
/// entries does not hit the resolver all at once.
pub const REFRESH_PAUSE: Duration = Duration::from_millis(10);

impl CachingResolver {
    /// One synchronous scan-and-refresh pass over every expired entry.
    ///
    /// Entries that fail to refresh keep their previous value and are retried
    /// on the next pass.
    pub async fn refresh_now(&self) -> CacheRefreshOutcome {
        let candidates = self.cache.expired_hosts(Instant::now());

        if candidates.is_empty() {
            return CacheRefreshOutcome {
                cache_size: self.cache.len(),
                ..Default::default()
            };
        }

        debug!(candidates = candidates.len(), "Refreshing expired cache entries");

        let mut refreshed = 0;
        let mut failed = 0;

        for (i, host) in candidates.iter().enumerate() {
            if i > 0 {
                sleep(REFRESH_PAUSE).await;
            }

            match self.lookup(host).await {
                Ok(_) => {
                    refreshed += 1;
                    self.cache
                        .metrics()
                        .refreshes
                        .fetch_add(1, AtomicOrdering::Relaxed);
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        host = %host,
                        error = %e,
                        "Failed to refresh cache entry, keeping previous value"
                    );
                }
            }
        }

        CacheRefreshOutcome {
            candidates_found: candidates.len(),
            refreshed,
            failed,
            cache_size: self.cache.len(),
        }
    }
}

#[async_trait]
impl CacheMaintenancePort for CachingResolver {
    async fn run_refresh_cycle(&self) -> Result<CacheRefreshOutcome, DomainError> {
        Ok(self.refresh_now().await)
    }

    fn refresh_interval(&self) -> watch::Receiver<Duration> {
        self.subscribe_interval()
    }
}
