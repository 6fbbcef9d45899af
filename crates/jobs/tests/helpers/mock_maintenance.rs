use async_trait::async_trait;
use hostcache_application::ports::{CacheMaintenancePort, CacheRefreshOutcome};
use hostcache_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};

pub struct MockCacheMaintenancePort {
    refresh_call_count: Arc<AtomicU64>,
    should_fail_refresh: Arc<AtomicBool>,
    refresh_outcome: Arc<RwLock<CacheRefreshOutcome>>,
    cycle_duration: Duration,
    interval_tx: watch::Sender<Duration>,
}

impl MockCacheMaintenancePort {
    pub fn new(interval: Duration) -> Self {
        let (interval_tx, _) = watch::channel(interval);
        Self {
            refresh_call_count: Arc::new(AtomicU64::new(0)),
            should_fail_refresh: Arc::new(AtomicBool::new(false)),
            refresh_outcome: Arc::new(RwLock::new(CacheRefreshOutcome::default())),
            cycle_duration: Duration::ZERO,
            interval_tx,
        }
    }

    pub fn with_refresh_outcome(mut self, outcome: CacheRefreshOutcome) -> Self {
        self.refresh_outcome = Arc::new(RwLock::new(outcome));
        self
    }

    /// Simulated resolver time spent inside each cycle.
    pub fn with_cycle_duration(mut self, duration: Duration) -> Self {
        self.cycle_duration = duration;
        self
    }

    pub fn refresh_call_count(&self) -> u64 {
        self.refresh_call_count.load(Ordering::SeqCst)
    }

    pub fn set_should_fail_refresh(&self, fail: bool) {
        self.should_fail_refresh.store(fail, Ordering::SeqCst);
    }

    pub fn set_interval(&self, interval: Duration) {
        self.interval_tx.send_replace(interval);
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_refresh_cycle(&self) -> Result<CacheRefreshOutcome, DomainError> {
        self.refresh_call_count.fetch_add(1, Ordering::SeqCst);
        if !self.cycle_duration.is_zero() {
            tokio::time::sleep(self.cycle_duration).await;
        }
        if self.should_fail_refresh.load(Ordering::SeqCst) {
            return Err(DomainError::resolution("mock", "refresh failure"));
        }
        Ok(self.refresh_outcome.read().await.clone())
    }

    fn refresh_interval(&self) -> watch::Receiver<Duration> {
        self.interval_tx.subscribe()
    }
}
