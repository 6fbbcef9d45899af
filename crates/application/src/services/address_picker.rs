use std::net::IpAddr;

/// Picks one address uniformly at random.
///
/// `None` only when `addresses` is empty; that is "no address", not a
/// resolution failure.
#[inline]
pub fn pick_address(addresses: &[IpAddr]) -> Option<IpAddr> {
    match addresses.len() {
        0 => None,
        1 => Some(addresses[0]),
        len => Some(addresses[fastrand::usize(..len)]),
    }
}
