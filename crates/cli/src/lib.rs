//! Concurrent TTL cache in front of hostname resolution.
//!
//! ```no_run
//! use hostcache::Resolver;
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), hostcache::DomainError> {
//! let resolver = Resolver::new(Duration::from_secs(60));
//! let addresses = resolver.fetch("example.com").await?;
//! println!("{addresses:?}");
//! resolver.stop();
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod builder;
pub mod resolver;

pub use builder::ResolverBuilder;
pub use resolver::Resolver;

pub use hostcache_application::ports::{CacheRefreshOutcome, HostResolver};
pub use hostcache_domain::{CacheConfig, Config, DomainError, TtlPolicy};
pub use hostcache_infrastructure::{CacheStats, CachedHost, SystemHostResolver};
