use crate::resolver::Resolver;
use hostcache_application::ports::HostResolver;
use hostcache_domain::{CacheConfig, TtlPolicy};
use hostcache_infrastructure::{CachingResolver, SystemHostResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct ResolverBuilder {
    resolver: Option<Arc<dyn HostResolver>>,
    default_ttl: Duration,
    host_ttls: Vec<(String, Duration)>,
    coalesce_misses: bool,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            resolver: None,
            default_ttl: Duration::ZERO,
            host_ttls: Vec::new(),
            coalesce_misses: false,
        }
    }

    /// Zero disables the background refresh loop.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_host_ttl(mut self, host: &str, ttl: Duration) -> Self {
        self.host_ttls.push((host.to_string(), ttl));
        self
    }

    pub fn with_config(mut self, config: &CacheConfig) -> Self {
        self.default_ttl = config.default_ttl();
        self.host_ttls.extend(
            config
                .host_ttl
                .iter()
                .map(|entry| (entry.host.clone(), Duration::from_millis(entry.ttl_ms))),
        );
        self.coalesce_misses = config.coalesce_misses;
        self
    }

    /// Resolution primitive; defaults to the system resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn HostResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_miss_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce_misses = enabled;
        self
    }

    /// # Panics
    ///
    /// Starting the refresh loop spawns a tokio task, so this panics outside a
    /// tokio runtime when the default TTL is non-zero.
    pub fn build(self) -> Resolver {
        let policy = self
            .host_ttls
            .iter()
            .fold(TtlPolicy::new(self.default_ttl), |policy, (host, ttl)| {
                policy.with_ttl(host, *ttl)
            });
        let refresh = policy.refresh_enabled();

        info!(
            default_ttl_ms = policy.default_ttl().as_millis() as u64,
            min_ttl_ms = policy.min_ttl().as_millis() as u64,
            overrides = self.host_ttls.len(),
            coalesce_misses = self.coalesce_misses,
            background_refresh = refresh,
            "Building host cache resolver"
        );

        let inner = self
            .resolver
            .unwrap_or_else(|| Arc::new(SystemHostResolver::new()));

        let mut caching = CachingResolver::new(inner, policy);
        if self.coalesce_misses {
            caching = caching.with_miss_coalescing();
        }

        Resolver::start(Arc::new(caching), refresh)
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
