use async_trait::async_trait;
use hostcache_application::ports::HostResolver;
use hostcache_domain::DomainError;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn ips(addrs: &[&str]) -> Vec<IpAddr> {
    addrs.iter().map(|a| a.parse().unwrap()).collect()
}

/// Scripted resolver: per-host answers, call counters, optional latency.
/// Hosts without a scripted answer fail with "no such host".
pub struct MockHostResolver {
    responses: Mutex<HashMap<String, Result<Vec<IpAddr>, DomainError>>>,
    calls: Mutex<HashMap<String, usize>>,
    total_calls: AtomicUsize,
    delay: Duration,
    forbid_calls: AtomicBool,
}

impl MockHostResolver {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            total_calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            forbid_calls: AtomicBool::new(false),
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn with_host(self, host: &str, addrs: &[&str]) -> Self {
        self.set_addresses(host, addrs);
        self
    }

    pub fn with_failure(self, host: &str) -> Self {
        self.set_failure(host);
        self
    }

    pub fn set_addresses(&self, host: &str, addrs: &[&str]) {
        self.responses
            .lock()
            .unwrap()
            .insert(host.to_string(), Ok(ips(addrs)));
    }

    pub fn set_failure(&self, host: &str) {
        self.responses.lock().unwrap().insert(
            host.to_string(),
            Err(DomainError::resolution(host, "no such host")),
        );
    }

    /// Any further call panics, failing the test.
    pub fn forbid_calls(&self) {
        self.forbid_calls.store(true, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, host: &str) -> usize {
        self.calls.lock().unwrap().get(host).copied().unwrap_or(0)
    }
}

#[async_trait]
impl HostResolver for MockHostResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        assert!(
            !self.forbid_calls.load(Ordering::SeqCst),
            "resolver must not be called for {host}"
        );

        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(host.to_string()).or_insert(0) += 1;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .get(host)
            .cloned()
            .unwrap_or_else(|| Err(DomainError::resolution(host, "no such host")))
    }
}
