use async_trait::async_trait;
use hostcache::{DomainError, HostResolver};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn ip(addr: &str) -> IpAddr {
    addr.parse().unwrap()
}

/// One scripted address per host; unknown hosts fail.
pub struct MockHostResolver {
    answers: Mutex<HashMap<String, IpAddr>>,
    calls: Mutex<HashMap<String, usize>>,
    total_calls: AtomicUsize,
}

impl MockHostResolver {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            total_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_host(self, host: &str, addr: &str) -> Self {
        self.set_address(host, addr);
        self
    }

    pub fn set_address(&self, host: &str, addr: &str) {
        self.answers.lock().unwrap().insert(host.to_string(), ip(addr));
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
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(host.to_string()).or_insert(0) += 1;

        self.answers
            .lock()
            .unwrap()
            .get(host)
            .map(|addr| vec![*addr])
            .ok_or_else(|| DomainError::resolution(host, "no such host"))
    }
}
