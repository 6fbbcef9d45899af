#![allow(dead_code)]

pub mod mock_resolver;

pub use mock_resolver::{ips, MockHostResolver};
