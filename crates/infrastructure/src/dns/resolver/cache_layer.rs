use super::super::cache::{CacheStats, CachedHost, HostCache};
use arc_swap::ArcSwap;
use dashmap::DashMap;
use hostcache_application::ports::HostResolver;
use hostcache_application::services::pick_address;
use hostcache_domain::{DomainError, TtlPolicy};
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

static EMPTY_ADDRESSES: LazyLock<Arc<[IpAddr]>> = LazyLock::new(|| Arc::from([]));

type InflightResult = Result<Arc<[IpAddr]>, DomainError>;
type InflightSender = Arc<watch::Sender<Option<InflightResult>>>;
type InflightMap = DashMap<Arc<str>, InflightSender, FxBuildHasher>;

struct InflightLeaderGuard {
    inflight: Arc<InflightMap>,
    host: Arc<str>,
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        // Leader unwound without publishing; wake followers so they retry.
        if let Some((_, tx)) = self.inflight.remove(&self.host) {
            let _ = tx.send(None);
        }
    }
}

/// Caching front for a [`HostResolver`].
///
/// Hits are served from the [`HostCache`] without resolving, stale or not.
/// Misses resolve synchronously and store the result. Concurrent misses for
/// the same host each resolve on their own (last writer wins) unless miss
/// coalescing is switched on with [`CachingResolver::with_miss_coalescing`].
pub struct CachingResolver {
    pub(crate) inner: Arc<dyn HostResolver>,
    pub(crate) cache: Arc<HostCache>,
    policy: ArcSwap<TtlPolicy>,
    interval_tx: watch::Sender<Duration>,
    inflight: Option<Arc<InflightMap>>,
}

impl CachingResolver {
    pub fn new(inner: Arc<dyn HostResolver>, policy: TtlPolicy) -> Self {
        let (interval_tx, _) = watch::channel(policy.min_ttl());

        Self {
            inner,
            cache: Arc::new(HostCache::new()),
            policy: ArcSwap::from_pointee(policy),
            interval_tx,
            inflight: None,
        }
    }

    /// Share one in-flight resolution between concurrent misses for a host.
    pub fn with_miss_coalescing(mut self) -> Self {
        self.inflight = Some(Arc::new(DashMap::with_hasher(FxBuildHasher)));
        self
    }

    pub fn coalesces_misses(&self) -> bool {
        self.inflight.is_some()
    }

    pub fn cache(&self) -> &Arc<HostCache> {
        &self.cache
    }

    pub fn policy(&self) -> Arc<TtlPolicy> {
        self.policy.load_full()
    }

    /// Registers a per-host TTL. When this lowers the minimum TTL, subscribers
    /// of the refresh interval are notified.
    pub fn set_ttl(&self, host: &str, ttl: Duration) {
        self.policy.rcu(|current| {
            let mut next = TtlPolicy::clone(current);
            next.set_ttl(host, ttl);
            next
        });

        let min_ttl = self.policy.load().min_ttl();
        self.interval_tx.send_if_modified(|current| {
            if *current == min_ttl {
                return false;
            }
            *current = min_ttl;
            true
        });

        info!(
            host = %host,
            ttl_ms = ttl.as_millis() as u64,
            min_ttl_ms = min_ttl.as_millis() as u64,
            "Registered TTL override"
        );
    }

    pub(crate) fn subscribe_interval(&self) -> watch::Receiver<Duration> {
        self.interval_tx.subscribe()
    }

    /// All addresses for `host`, from cache when present.
    pub async fn fetch(&self, host: &str) -> Result<Arc<[IpAddr]>, DomainError> {
        if let Some(entry) = self.cache.get(host) {
            return Ok(Arc::clone(&entry.addresses));
        }

        self.resolve_miss(host).await
    }

    /// One address for `host`, picked uniformly at random. `Ok(None)` when the
    /// host resolved to no addresses.
    pub async fn fetch_one(&self, host: &str) -> Result<Option<IpAddr>, DomainError> {
        let addresses = self.fetch(host).await?;
        Ok(pick_address(&addresses))
    }

    /// [`fetch_one`](Self::fetch_one) formatted; empty when there is no address.
    pub async fn fetch_one_as_text(&self, host: &str) -> Result<String, DomainError> {
        Ok(self
            .fetch_one(host)
            .await?
            .map(|ip| ip.to_string())
            .unwrap_or_default())
    }

    /// IPv4 addresses for `host`.
    ///
    /// A cold miss costs one resolution plus one extra store read.
    pub async fn fetch_v4(&self, host: &str) -> Result<Arc<[IpAddr]>, DomainError> {
        if let Some(entry) = self.cache.get(host) {
            return Ok(Arc::clone(&entry.ipv4));
        }

        self.resolve_miss(host).await?;

        Ok(self
            .cache
            .peek(host)
            .map(|entry| Arc::clone(&entry.ipv4))
            .unwrap_or_else(|| Arc::clone(&EMPTY_ADDRESSES)))
    }

    pub async fn fetch_one_v4(&self, host: &str) -> Result<Option<IpAddr>, DomainError> {
        let addresses = self.fetch_v4(host).await?;
        Ok(pick_address(&addresses))
    }

    pub async fn fetch_one_v4_as_text(&self, host: &str) -> Result<String, DomainError> {
        Ok(self
            .fetch_one_v4(host)
            .await?
            .map(|ip| ip.to_string())
            .unwrap_or_default())
    }

    /// Resolves `host` bypassing the cache and replaces its record.
    ///
    /// On failure the resolver's error is returned unchanged and the existing
    /// record, if any, is left in place.
    pub async fn lookup(&self, host: &str) -> Result<Arc<[IpAddr]>, DomainError> {
        let addresses = match self.inner.resolve(host).await {
            Ok(addresses) => addresses,
            Err(e) => {
                self.cache
                    .metrics()
                    .resolution_failures
                    .fetch_add(1, AtomicOrdering::Relaxed);
                debug!(host = %host, error = %e, "Resolution failed");
                return Err(e);
            }
        };

        let ttl = self.policy.load().ttl_for(host);
        let record = Arc::new(CachedHost::new(addresses, ttl));
        let addresses = Arc::clone(&record.addresses);
        self.cache.insert(host, record);

        debug!(
            host = %host,
            addresses = addresses.len(),
            ttl_ms = ttl.as_millis() as u64,
            "Resolved and cached"
        );

        Ok(addresses)
    }

    /// Current record for `host` without resolving or counting a hit.
    pub fn peek(&self, host: &str) -> Option<Arc<CachedHost>> {
        self.cache.peek(host)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn resolve_miss(&self, host: &str) -> Result<Arc<[IpAddr]>, DomainError> {
        let Some(inflight) = &self.inflight else {
            return self.lookup(host).await;
        };

        let key: Arc<str> = Arc::from(host);
        match register_or_join_inflight(inflight, &key) {
            Some(tx) => self.resolve_as_leader(inflight, key, tx).await,
            None => {
                let rx = inflight.get(&key).map(|tx| tx.subscribe());
                match rx {
                    Some(rx) => self.resolve_as_follower(host, rx).await,
                    // Leader finished between registration and subscribe.
                    None => self.fetch_after_leader(host).await,
                }
            }
        }
    }

    async fn resolve_as_leader(
        &self,
        inflight: &Arc<InflightMap>,
        key: Arc<str>,
        tx: InflightSender,
    ) -> Result<Arc<[IpAddr]>, DomainError> {
        let guard = InflightLeaderGuard {
            inflight: Arc::clone(inflight),
            host: Arc::clone(&key),
        };

        let result = self.lookup(&key).await;

        inflight.remove(&key);
        tx.send_replace(Some(result.clone()));

        drop(guard);
        result
    }

    async fn resolve_as_follower(
        &self,
        host: &str,
        mut rx: watch::Receiver<Option<InflightResult>>,
    ) -> Result<Arc<[IpAddr]>, DomainError> {
        debug!(host = %host, "Joining in-flight resolution");

        if let Some(result) = rx.borrow_and_update().clone() {
            return result;
        }

        if rx.changed().await.is_ok() {
            if let Some(result) = rx.borrow().clone() {
                return result;
            }
        }

        self.fetch_after_leader(host).await
    }

    async fn fetch_after_leader(&self, host: &str) -> Result<Arc<[IpAddr]>, DomainError> {
        match self.cache.peek(host) {
            Some(entry) => Ok(Arc::clone(&entry.addresses)),
            None => self.lookup(host).await,
        }
    }
}

/// Returns the sender when the caller became the leader for `key`.
fn register_or_join_inflight(inflight: &InflightMap, key: &Arc<str>) -> Option<InflightSender> {
    match inflight.entry(Arc::clone(key)) {
        dashmap::Entry::Occupied(_) => None,
        dashmap::Entry::Vacant(e) => {
            let (tx, _) = watch::channel(None::<InflightResult>);
            let tx = Arc::new(tx);
            e.insert(Arc::clone(&tx));
            Some(tx)
        }
    }
}
