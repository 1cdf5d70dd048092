//! Family-tagged network prefix and CIDR text parsing.

use super::ipv4::{self, Ipv4Prefix};
use super::ipv6::{self, Ipv6Prefix};
use crate::error::AggregateError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Address family of a prefix. IPv4 orders before IPv6.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub enum Family {
    Ipv4,
    Ipv6,
}

impl Family {
    /// Number of address bits in this family.
    pub fn bits(&self) -> u8 {
        match self {
            Family::Ipv4 => ipv4::MAX_LENGTH,
            Family::Ipv6 => ipv6::MAX_LENGTH,
        }
    }

    pub fn of(addr: &IpAddr) -> Family {
        match addr {
            IpAddr::V4(_) => Family::Ipv4,
            IpAddr::V6(_) => Family::Ipv6,
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Family::Ipv4 => write!(f, "IPv4"),
            Family::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Canonical IPv4 or IPv6 network prefix.
///
/// The derived ordering puts every IPv4 prefix before every IPv6 prefix, then
/// orders by address and finally by length.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub enum Prefix {
    V4(Ipv4Prefix),
    V6(Ipv6Prefix),
}

impl Prefix {
    /// Create a prefix from an address and length, clearing host bits.
    pub fn new(addr: IpAddr, len: u8) -> Result<Prefix, AggregateError> {
        match addr {
            IpAddr::V4(addr) => Ok(Prefix::V4(Ipv4Prefix::new(addr, len)?)),
            IpAddr::V6(addr) => Ok(Prefix::V6(Ipv6Prefix::new(addr, len)?)),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Prefix::V4(_) => Family::Ipv4,
            Prefix::V6(_) => Family::Ipv6,
        }
    }

    pub fn addr(&self) -> IpAddr {
        match self {
            Prefix::V4(p) => IpAddr::V4(p.addr()),
            Prefix::V6(p) => IpAddr::V6(p.addr()),
        }
    }

    pub fn prefix_len(&self) -> u8 {
        match self {
            Prefix::V4(p) => p.prefix_len(),
            Prefix::V6(p) => p.prefix_len(),
        }
    }

    /// The subnet mask in address form, e.g. 255.255.255.0 for a /24.
    pub fn mask(&self) -> IpAddr {
        match self {
            Prefix::V4(p) => IpAddr::V4(Ipv4Addr::from(p.mask())),
            Prefix::V6(p) => IpAddr::V6(Ipv6Addr::from(p.mask())),
        }
    }

    /// The highest address covered by this prefix.
    pub fn broadcast(&self) -> IpAddr {
        match self {
            Prefix::V4(p) => IpAddr::V4(p.broadcast()),
            Prefix::V6(p) => IpAddr::V6(p.broadcast()),
        }
    }

    pub fn num_addresses(&self) -> u128 {
        match self {
            Prefix::V4(p) => p.num_addresses(),
            Prefix::V6(p) => p.num_addresses(),
        }
    }

    /// True when `addr` lies within this prefix. Always false across families.
    pub fn contains(&self, addr: IpAddr) -> bool {
        match (self, addr) {
            (Prefix::V4(p), IpAddr::V4(a)) => p.contains(a),
            (Prefix::V6(p), IpAddr::V6(a)) => p.contains(a),
            _ => false,
        }
    }

    pub fn contains_prefix(&self, other: &Prefix) -> bool {
        match (self, other) {
            (Prefix::V4(p), Prefix::V4(o)) => p.contains_prefix(o),
            (Prefix::V6(p), Prefix::V6(o)) => p.contains_prefix(o),
            _ => false,
        }
    }

    pub fn parent(&self) -> Option<Prefix> {
        match self {
            Prefix::V4(p) => p.parent().map(Prefix::V4),
            Prefix::V6(p) => p.parent().map(Prefix::V6),
        }
    }

    /// True when both prefixes are the two halves of one parent prefix.
    pub fn is_buddy_of(&self, other: &Prefix) -> bool {
        match (self, other) {
            (Prefix::V4(p), Prefix::V4(o)) => p.is_buddy_of(o),
            (Prefix::V6(p), Prefix::V6(o)) => p.is_buddy_of(o),
            _ => false,
        }
    }

    /// Address bits left-aligned in a u128, so bit 127 is the first bit of
    /// the address for both families.
    pub(crate) fn key(&self) -> u128 {
        addr_key(&self.addr())
    }

    /// Rebuild a prefix from a left-aligned key as produced by [`Prefix::key`].
    pub(crate) fn from_key(
        family: Family,
        key: u128,
        len: u8,
    ) -> Result<Prefix, AggregateError> {
        let addr = match family {
            Family::Ipv4 => IpAddr::V4(Ipv4Addr::from((key >> 96) as u32)),
            Family::Ipv6 => IpAddr::V6(Ipv6Addr::from(key)),
        };
        Prefix::new(addr, len)
    }
}

/// Left-aligned address bits, see [`Prefix::key`].
pub(crate) fn addr_key(addr: &IpAddr) -> u128 {
    match addr {
        IpAddr::V4(a) => u128::from(u32::from(*a)) << 96,
        IpAddr::V6(a) => u128::from(*a),
    }
}

impl From<Ipv4Prefix> for Prefix {
    fn from(p: Ipv4Prefix) -> Prefix {
        Prefix::V4(p)
    }
}

impl From<Ipv6Prefix> for Prefix {
    fn from(p: Ipv6Prefix) -> Prefix {
        Prefix::V6(p)
    }
}

impl FromStr for Prefix {
    type Err = AggregateError;

    /// Parse "address/length", e.g. "10.0.0.0/24" or "2001:db8::/32".
    fn from_str(addr_cidr: &str) -> Result<Prefix, AggregateError> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(AggregateError::parse(addr_cidr, "Invalid address/length"));
        }
        let addr: IpAddr = parts[0].parse().map_err(|_| {
            AggregateError::parse(addr_cidr, format!("Invalid address {}", parts[0]))
        })?;
        if parts[1].is_empty() || !parts[1].bytes().all(|b| b.is_ascii_digit()) {
            return Err(AggregateError::parse(
                addr_cidr,
                format!("Invalid prefix length {}", parts[1]),
            ));
        }
        let family = Family::of(&addr);
        let len = parts[1]
            .parse::<u8>()
            .ok()
            .filter(|len| *len <= family.bits())
            .ok_or_else(|| {
                AggregateError::parse(
                    addr_cidr,
                    format!(
                        "{family} prefix length must be at most {}",
                        family.bits()
                    ),
                )
            })?;
        Prefix::new(addr, len)
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Prefix::V4(p) => write!(f, "{p}"),
            Prefix::V6(p) => write!(f, "{p}"),
        }
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::from_str(&s).map_err(de::Error::custom)
    }
}
