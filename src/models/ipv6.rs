//! IPv6 prefix arithmetic.

use crate::error::AggregateError;
use std::net::Ipv6Addr;

/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH: u8 = 128;

/// Convert a CIDR prefix length to a subnet mask as u128.
pub fn get_cidr_mask(len: u8) -> Option<u128> {
    if len > MAX_LENGTH {
        return None;
    }
    // A shift by the full width is out of range for u128, hence checked_shl.
    Some(u128::MAX.checked_shl(u32::from(MAX_LENGTH - len)).unwrap_or(0))
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv6Addr, len: u8) -> Option<Ipv6Addr> {
    let mask = get_cidr_mask(len)?;
    Some(Ipv6Addr::from(u128::from(addr) & mask))
}

/// Canonical IPv6 network prefix.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv6Prefix {
    addr: Ipv6Addr,
    len: u8,
}

impl Ipv6Prefix {
    /// Create a prefix, clearing any host bits set in `addr`.
    pub fn new(addr: Ipv6Addr, len: u8) -> Result<Ipv6Prefix, AggregateError> {
        let network = cut_addr(addr, len).ok_or_else(|| {
            AggregateError::parse(
                format!("{addr}/{len}"),
                format!("IPv6 prefix length must be at most {MAX_LENGTH}"),
            )
        })?;
        Ok(Ipv6Prefix {
            addr: network,
            len,
        })
    }

    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    pub fn mask(&self) -> u128 {
        get_cidr_mask(self.len).unwrap_or(u128::MAX)
    }

    pub fn broadcast(&self) -> Ipv6Addr {
        Ipv6Addr::from(u128::from(self.addr) | !self.mask())
    }

    /// Number of addresses covered, saturating at `u128::MAX` for `::/0`.
    pub fn num_addresses(&self) -> u128 {
        1u128
            .checked_shl(u32::from(MAX_LENGTH - self.len))
            .unwrap_or(u128::MAX)
    }

    pub fn contains(&self, addr: Ipv6Addr) -> bool {
        u128::from(addr) & self.mask() == u128::from(self.addr)
    }

    pub fn contains_prefix(&self, other: &Ipv6Prefix) -> bool {
        other.len >= self.len && self.contains(other.addr)
    }

    /// The prefix one bit shorter, or `None` for `::/0`.
    pub fn parent(&self) -> Option<Ipv6Prefix> {
        let len = self.len.checked_sub(1)?;
        let addr = cut_addr(self.addr, len)?;
        Some(Ipv6Prefix { addr, len })
    }

    pub fn is_buddy_of(&self, other: &Ipv6Prefix) -> bool {
        if self.len != other.len || self.addr == other.addr {
            return false;
        }
        self.parent()
            .map(|parent| parent.contains(other.addr))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Ipv6Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}
