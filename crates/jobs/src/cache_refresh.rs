use hostcache_application::ports::CacheMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Floor for the wait between cycles; a zero minimum TTL would otherwise
/// spin the runtime.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Background loop that refreshes expired cache entries.
///
/// Waits for the maintenance port's current refresh interval, runs one
/// refresh cycle, repeats. The interval is re-read whenever the port reports
/// a change, so a newly lowered TTL takes effect without waiting out the old
/// one. Cancelling the token stops the loop at the next cycle boundary; a
/// cycle already in progress runs to completion first.
pub struct CacheRefreshJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    shutdown: CancellationToken,
}

impl CacheRefreshJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(&self) {
        let mut interval_rx = self.maintenance.refresh_interval();

        info!(
            interval_ms = interval_rx.borrow().as_millis() as u64,
            "Starting cache refresh job"
        );

        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            let interval = (*interval_rx.borrow_and_update()).max(MIN_REFRESH_INTERVAL);

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                changed = interval_rx.changed() => {
                    if changed.is_err() {
                        debug!("Refresh interval source dropped");
                        break;
                    }
                    debug!(
                        interval_ms = interval_rx.borrow().as_millis() as u64,
                        "Refresh interval changed, re-arming"
                    );
                    continue;
                }
                _ = sleep(interval) => {}
            }

            if self.shutdown.is_cancelled() {
                break;
            }

            match self.maintenance.run_refresh_cycle().await {
                Ok(outcome) => {
                    if outcome.candidates_found > 0 {
                        info!(
                            candidates = outcome.candidates_found,
                            refreshed = outcome.refreshed,
                            failed = outcome.failed,
                            cache_size = outcome.cache_size,
                            "Cache refresh cycle completed"
                        );
                    }
                }
                Err(e) => {
                    error!(error = %e, "Cache refresh cycle failed");
                }
            }
        }

        info!("CacheRefreshJob: shutting down");
    }
}
