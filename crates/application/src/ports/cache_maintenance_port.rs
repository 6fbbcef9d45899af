use async_trait::async_trait;
use hostcache_domain::DomainError;
use std::time::Duration;
use tokio::sync::watch;

/// Outcome of a cache refresh cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheRefreshOutcome {
    pub candidates_found: usize,
    pub refreshed: usize,
    pub failed: usize,
    pub cache_size: usize,
}

/// Port for proactive cache refresh.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Re-resolve every expired entry once.
    async fn run_refresh_cycle(&self) -> Result<CacheRefreshOutcome, DomainError>;

    /// Current wait between cycles. The receiver is notified whenever the
    /// interval changes so a sleeping loop can re-arm.
    fn refresh_interval(&self) -> watch::Receiver<Duration>;
}
