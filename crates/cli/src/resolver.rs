use crate::builder::ResolverBuilder;
use hostcache_application::ports::{CacheRefreshOutcome, HostResolver};
use hostcache_domain::{CacheConfig, DomainError, TtlPolicy};
use hostcache_infrastructure::{CacheStats, CachedHost, CachingResolver};
use hostcache_jobs::CacheRefreshJob;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cached hostname resolver with an optional background refresh loop.
///
/// Lookups are served from cache whenever a record exists, including stale
/// ones. Stale records are re-resolved by the background loop, which wakes
/// once per minimum TTL. The loop runs only when the default TTL is non-zero
/// and stops on [`Resolver::stop`] or when the resolver is dropped.
pub struct Resolver {
    inner: Arc<CachingResolver>,
    shutdown: CancellationToken,
    refresh_task: Option<JoinHandle<()>>,
}

impl Resolver {
    pub(crate) fn start(inner: Arc<CachingResolver>, refresh: bool) -> Self {
        let shutdown = CancellationToken::new();

        let refresh_task = refresh.then(|| {
            let job = CacheRefreshJob::new(inner.clone()).with_cancellation(shutdown.clone());
            Arc::new(job).start()
        });

        Self {
            inner,
            shutdown,
            refresh_task,
        }
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Resolver backed by the system resolver.
    ///
    /// # Panics
    ///
    /// Panics outside a tokio runtime when `default_ttl` is non-zero.
    pub fn new(default_ttl: Duration) -> Self {
        ResolverBuilder::new().with_default_ttl(default_ttl).build()
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        ResolverBuilder::new().with_config(config).build()
    }

    /// Resolver backed by a caller-supplied resolution primitive.
    pub fn with_resolver(resolver: Arc<dyn HostResolver>, policy: TtlPolicy) -> Self {
        let refresh = policy.refresh_enabled();
        Self::start(Arc::new(CachingResolver::new(resolver, policy)), refresh)
    }

    /// Overrides the TTL for `host`. Takes effect for the next stored record;
    /// a lower TTL also shortens the refresh loop's wait immediately.
    pub fn set_ttl(&self, host: &str, ttl: Duration) {
        self.inner.set_ttl(host, ttl);
    }

    pub async fn fetch(&self, host: &str) -> Result<Arc<[IpAddr]>, DomainError> {
        self.inner.fetch(host).await
    }

    pub async fn fetch_one(&self, host: &str) -> Result<Option<IpAddr>, DomainError> {
        self.inner.fetch_one(host).await
    }

    pub async fn fetch_one_as_text(&self, host: &str) -> Result<String, DomainError> {
        self.inner.fetch_one_as_text(host).await
    }

    pub async fn fetch_v4(&self, host: &str) -> Result<Arc<[IpAddr]>, DomainError> {
        self.inner.fetch_v4(host).await
    }

    pub async fn fetch_one_v4(&self, host: &str) -> Result<Option<IpAddr>, DomainError> {
        self.inner.fetch_one_v4(host).await
    }

    pub async fn fetch_one_v4_as_text(&self, host: &str) -> Result<String, DomainError> {
        self.inner.fetch_one_v4_as_text(host).await
    }

    /// Resolves bypassing the cache and replaces the stored record.
    pub async fn lookup(&self, host: &str) -> Result<Arc<[IpAddr]>, DomainError> {
        self.inner.lookup(host).await
    }

    /// Runs one refresh pass on the caller's task, independent of the loop.
    pub async fn refresh_now(&self) -> CacheRefreshOutcome {
        self.inner.refresh_now().await
    }

    /// Stops the background loop. Idempotent and non-blocking; a refresh
    /// pass already in progress finishes on its own.
    pub fn stop(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        info!("Host cache refresh loop stop requested");
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub fn is_refresh_running(&self) -> bool {
        self.refresh_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }

    pub fn peek(&self, host: &str) -> Option<Arc<CachedHost>> {
        self.inner.peek(host)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn caching_resolver(&self) -> &Arc<CachingResolver> {
        &self.inner
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
