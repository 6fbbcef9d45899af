pub mod cache;
pub mod cache_maintenance;
pub mod resolver;

pub use cache::{CacheMetrics, CacheStats, CachedHost, HostCache};
pub use cache_maintenance::REFRESH_PAUSE;
pub use resolver::CachingResolver;
