mod metrics;
mod record;
mod refresh;
mod storage;

pub use metrics::{CacheMetrics, CacheStats};
pub use record::CachedHost;
pub use storage::HostCache;
