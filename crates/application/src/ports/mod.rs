mod cache_maintenance_port;
mod host_resolver;

pub use cache_maintenance_port::{CacheMaintenancePort, CacheRefreshOutcome};
pub use host_resolver::HostResolver;
