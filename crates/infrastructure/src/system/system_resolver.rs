use async_trait::async_trait;
use hostcache_application::ports::HostResolver;
use hostcache_domain::DomainError;
use std::net::IpAddr;
use tracing::debug;

/// Resolves through the operating system (`getaddrinfo` via tokio's
/// blocking pool). IP literals resolve to themselves without a query.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostResolver;

impl SystemHostResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        if host.trim().is_empty() {
            return Err(DomainError::InvalidHostName(host.to_string()));
        }

        debug!(host = %host, "Performing system lookup");

        let resolved = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| DomainError::resolution(host, e))?;

        // getaddrinfo repeats each address once per socket type.
        let mut addresses: Vec<IpAddr> = Vec::new();
        for addr in resolved {
            let ip = addr.ip();
            if !addresses.contains(&ip) {
                addresses.push(ip);
            }
        }

        debug!(host = %host, addresses = addresses.len(), "System lookup successful");
        Ok(addresses)
    }
}
