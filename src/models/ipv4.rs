//! IPv4 prefix arithmetic.
//!
//! Provides [`Ipv4Prefix`], a canonical IPv4 network prefix, along with the
//! mask helpers it is built on.

use crate::error::AggregateError;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// Returns `None` when `len` is longer than [`MAX_LENGTH`].
///
/// # Examples
/// ```
/// use cidr_aggregate::models::ipv4::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24), Some(0xFFFFFF00));
/// ```
pub fn get_cidr_mask(len: u8) -> Option<u32> {
    if len > MAX_LENGTH {
        return None;
    }
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;

    let mask = (all_bits >> right_len) << right_len;

    Some(mask as u32)
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Option<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    Some(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast (highest) address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Option<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Some(Ipv4Addr::from(network_bits | !mask))
}

/// Canonical IPv4 network prefix.
///
/// Host bits beyond `prefix_len` are always zero. Ordering is by address,
/// then by length.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4Prefix {
    addr: Ipv4Addr,
    len: u8,
}

impl Ipv4Prefix {
    /// Create a prefix, clearing any host bits set in `addr`.
    pub fn new(addr: Ipv4Addr, len: u8) -> Result<Ipv4Prefix, AggregateError> {
        let network = cut_addr(addr, len).ok_or_else(|| {
            AggregateError::parse(
                format!("{addr}/{len}"),
                format!("IPv4 prefix length must be at most {MAX_LENGTH}"),
            )
        })?;
        Ok(Ipv4Prefix {
            addr: network,
            len,
        })
    }

    /// The network (lowest) address.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    /// The subnet mask as u32.
    pub fn mask(&self) -> u32 {
        // len is validated on construction
        get_cidr_mask(self.len).unwrap_or(u32::MAX)
    }

    /// The highest address covered by this prefix.
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !self.mask())
    }

    /// Number of addresses covered.
    pub fn num_addresses(&self) -> u128 {
        1u128 << (MAX_LENGTH - self.len)
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & self.mask() == u32::from(self.addr)
    }

    /// True when every address of `other` is also covered by `self`.
    pub fn contains_prefix(&self, other: &Ipv4Prefix) -> bool {
        other.len >= self.len && self.contains(other.addr)
    }

    /// The prefix one bit shorter, or `None` for `0.0.0.0/0`.
    pub fn parent(&self) -> Option<Ipv4Prefix> {
        let len = self.len.checked_sub(1)?;
        let addr = cut_addr(self.addr, len)?;
        Some(Ipv4Prefix { addr, len })
    }

    /// True when `self` and `other` are the two halves of the same parent.
    pub fn is_buddy_of(&self, other: &Ipv4Prefix) -> bool {
        if self.len != other.len || self.addr == other.addr {
            return false;
        }
        match self.parent() {
            Some(parent) => parent.contains(other.addr),
            None => false,
        }
    }
}

impl std::fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}
