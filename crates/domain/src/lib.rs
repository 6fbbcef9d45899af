//! hostcache domain layer
pub mod config;
pub mod errors;
pub mod ttl_policy;

pub use config::{CacheConfig, CliOverrides, Config, ConfigError, HostTtl, LogFormat, LoggingConfig};
pub use errors::DomainError;
pub use ttl_policy::TtlPolicy;
