use async_trait::async_trait;
use hostcache_domain::DomainError;
use std::net::IpAddr;

/// Forward name resolution: host name to addresses.
///
/// Implementations may be slow and may fail. The cache treats the call as
/// opaque and never holds a lock across it.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, DomainError>;
}
