//! Prefix data model.
//!
//! - [`Prefix`] - family-tagged canonical network prefix
//! - [`Ipv4Prefix`] / [`Ipv6Prefix`] - per-family bit arithmetic
//! - [`Family`] - address family, IPv4 ordered first

pub mod ipv4;
pub mod ipv6;
mod prefix;

// Re-export public types
pub use ipv4::Ipv4Prefix;
pub use ipv6::Ipv6Prefix;
pub use prefix::{Family, Prefix};
pub(crate) use prefix::addr_key;
