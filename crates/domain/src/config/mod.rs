pub mod cache;
pub mod errors;
pub mod logging;
pub mod root;

pub use cache::{CacheConfig, HostTtl};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
