use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

// Fallback expiry for TTLs too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// One resolved host. Replaced as a whole on every successful lookup, never
/// mutated in place, so readers holding an `Arc` always see a complete record.
#[derive(Debug, Clone)]
pub struct CachedHost {
    pub addresses: Arc<[IpAddr]>,
    /// IPv4 subset of `addresses`, computed once at insertion.
    pub ipv4: Arc<[IpAddr]>,
    pub expires_at: Instant,
}

impl CachedHost {
    pub fn new(addresses: Vec<IpAddr>, ttl: Duration) -> Self {
        let now = Instant::now();
        Self::with_expiry(
            addresses,
            now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE),
        )
    }

    pub fn with_expiry(addresses: Vec<IpAddr>, expires_at: Instant) -> Self {
        let ipv4: Arc<[IpAddr]> = addresses.iter().copied().filter(IpAddr::is_ipv4).collect();

        Self {
            addresses: Arc::from(addresses),
            ipv4,
            expires_at,
        }
    }

    #[inline(always)]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    #[inline(always)]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at < now
    }
}
