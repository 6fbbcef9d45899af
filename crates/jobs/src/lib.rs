pub mod cache_refresh;

pub use cache_refresh::{CacheRefreshJob, MIN_REFRESH_INTERVAL};
