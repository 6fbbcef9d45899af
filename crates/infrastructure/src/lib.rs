//! hostcache infrastructure: the host cache, the caching resolver and the
//! system resolver adapter
pub mod dns;
pub mod system;

pub use dns::{CacheStats, CachedHost, CachingResolver, HostCache, REFRESH_PAUSE};
pub use system::SystemHostResolver;
