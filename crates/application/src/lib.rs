//! hostcache application layer: ports and pure services
pub mod ports;
pub mod services;
