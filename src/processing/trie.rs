//! Binary prefix trie used for containment checks.
//!
//! Each [`PrefixTrie`] holds prefixes of one address family in an arena of
//! nodes; [`PrefixRanger`] pairs an IPv4 and an IPv6 trie and dispatches on the
//! family of its argument.

use crate::error::AggregateError;
use crate::models::{addr_key, Family, Prefix};
use std::net::IpAddr;

#[derive(Debug, Default, Clone)]
struct Node {
    children: [Option<usize>; 2],
    /// An inserted prefix ends at this node.
    terminal: bool,
}

/// Bit `depth` of a left-aligned key (depth 0 is the most significant bit).
fn bit_at(key: u128, depth: u8) -> usize {
    ((key >> (127 - u32::from(depth))) & 1) as usize
}

/// Keep only the first `depth` bits of a left-aligned key.
fn truncate_key(key: u128, depth: u8) -> u128 {
    key & u128::MAX.checked_shl(128 - u32::from(depth)).unwrap_or(0)
}

/// Binary trie of prefixes from a single address family.
#[derive(Debug, Clone)]
pub struct PrefixTrie {
    family: Family,
    nodes: Vec<Node>,
    count: usize,
}

impl PrefixTrie {
    pub fn new(family: Family) -> PrefixTrie {
        PrefixTrie {
            family,
            nodes: vec![Node::default()],
            count: 0,
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Number of prefixes inserted.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn check_family(
        &self,
        family: Family,
        what: &dyn std::fmt::Display,
    ) -> Result<(), AggregateError> {
        if family != self.family {
            return Err(AggregateError::Structural(format!(
                "{what} is {family} ({} bits) but the trie holds {} ({} bits)",
                family.bits(),
                self.family,
                self.family.bits()
            )));
        }
        Ok(())
    }

    /// Insert a prefix. Returns `false` when it was already present.
    pub fn insert(&mut self, prefix: &Prefix) -> Result<bool, AggregateError> {
        self.check_family(prefix.family(), prefix)?;
        let key = prefix.key();
        let mut node = 0;
        for depth in 0..prefix.prefix_len() {
            let bit = bit_at(key, depth);
            let next = self.nodes[node].children[bit];
            node = match next {
                Some(child) => child,
                None => {
                    self.nodes.push(Node::default());
                    let child = self.nodes.len() - 1;
                    self.nodes[node].children[bit] = Some(child);
                    child
                }
            };
        }
        if self.nodes[node].terminal {
            return Ok(false);
        }
        self.nodes[node].terminal = true;
        self.count += 1;
        log::trace!("trie {} insert {}", self.family, prefix);
        Ok(true)
    }

    /// The shortest inserted prefix covering `addr`, if any.
    pub fn covering(&self, addr: IpAddr) -> Result<Option<Prefix>, AggregateError> {
        self.check_family(Family::of(&addr), &addr)?;
        let key = addr_key(&addr);
        let mut node = 0;
        let mut depth = 0;
        loop {
            if self.nodes[node].terminal {
                return Prefix::from_key(self.family, truncate_key(key, depth), depth).map(Some);
            }
            if depth == self.family.bits() {
                return Ok(None);
            }
            node = match self.nodes[node].children[bit_at(key, depth)] {
                Some(child) => child,
                None => return Ok(None),
            };
            depth += 1;
        }
    }

    /// True when `addr` is covered by any inserted prefix.
    pub fn contains(&self, addr: IpAddr) -> Result<bool, AggregateError> {
        Ok(self.covering(addr)?.is_some())
    }

    /// All outermost inserted prefixes in ascending address order.
    ///
    /// A prefix nested inside another inserted prefix is not reported.
    pub fn covered_networks(&self) -> Result<Vec<Prefix>, AggregateError> {
        let mut networks = Vec::with_capacity(self.count);
        let mut stack: Vec<(usize, u128, u8)> = vec![(0, 0, 0)];
        while let Some((node, key, depth)) = stack.pop() {
            if self.nodes[node].terminal {
                networks.push(Prefix::from_key(self.family, key, depth)?);
                continue;
            }
            if depth >= self.family.bits() {
                return Err(AggregateError::Structural(format!(
                    "{} trie node below /{} at depth {depth}",
                    self.family,
                    self.family.bits()
                )));
            }
            // Push the 1 branch first so the 0 branch is visited first.
            if let Some(child) = self.nodes[node].children[1] {
                stack.push((child, key | (1u128 << (127 - u32::from(depth))), depth + 1));
            }
            if let Some(child) = self.nodes[node].children[0] {
                stack.push((child, key, depth + 1));
            }
        }
        Ok(networks)
    }
}

/// One trie per address family.
#[derive(Debug, Clone)]
pub struct PrefixRanger {
    ipv4: PrefixTrie,
    ipv6: PrefixTrie,
}

impl Default for PrefixRanger {
    fn default() -> Self {
        PrefixRanger::new()
    }
}

impl PrefixRanger {
    pub fn new() -> PrefixRanger {
        PrefixRanger {
            ipv4: PrefixTrie::new(Family::Ipv4),
            ipv6: PrefixTrie::new(Family::Ipv6),
        }
    }

    fn trie(&self, family: Family) -> &PrefixTrie {
        match family {
            Family::Ipv4 => &self.ipv4,
            Family::Ipv6 => &self.ipv6,
        }
    }

    pub fn insert(&mut self, prefix: &Prefix) -> Result<bool, AggregateError> {
        match prefix.family() {
            Family::Ipv4 => self.ipv4.insert(prefix),
            Family::Ipv6 => self.ipv6.insert(prefix),
        }
    }

    pub fn contains(&self, addr: IpAddr) -> Result<bool, AggregateError> {
        self.trie(Family::of(&addr)).contains(addr)
    }

    pub fn len(&self) -> usize {
        self.ipv4.len() + self.ipv6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Covered networks of both families, IPv4 first.
    pub fn covered_networks(&self) -> Result<Vec<Prefix>, AggregateError> {
        let mut networks = self.ipv4.covered_networks()?;
        networks.extend(self.ipv6.covered_networks()?);
        Ok(networks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Prefix {
        s.parse().unwrap()
    }

    #[test]
    fn test_insert_and_contains() {
        let mut trie = PrefixTrie::new(Family::Ipv4);
        assert!(trie.is_empty());
        assert!(trie.insert(&p("192.0.2.0/24")).unwrap());
        assert!(!trie.insert(&p("192.0.2.0/24")).unwrap());
        assert_eq!(trie.len(), 1);

        assert!(trie.contains("192.0.2.77".parse().unwrap()).unwrap());
        assert!(!trie.contains("192.0.3.0".parse().unwrap()).unwrap());
        assert!(!trie.contains("192.0.1.255".parse().unwrap()).unwrap());
    }

    #[test]
    fn test_covering_returns_shortest() {
        let mut trie = PrefixTrie::new(Family::Ipv4);
        trie.insert(&p("10.1.0.0/16")).unwrap();
        trie.insert(&p("10.0.0.0/8")).unwrap();
        assert_eq!(
            trie.covering("10.1.2.3".parse().unwrap()).unwrap(),
            Some(p("10.0.0.0/8"))
        );
        assert_eq!(trie.covering("11.0.0.0".parse().unwrap()).unwrap(), None);
    }

    #[test]
    fn test_default_route_covers_everything() {
        let mut trie = PrefixTrie::new(Family::Ipv6);
        trie.insert(&p("::/0")).unwrap();
        assert_eq!(
            trie.covering("2001:db8::1".parse().unwrap()).unwrap(),
            Some(p("::/0"))
        );
        assert_eq!(trie.covered_networks().unwrap(), vec![p("::/0")]);
    }

    #[test]
    fn test_host_prefix() {
        let mut trie = PrefixTrie::new(Family::Ipv4);
        trie.insert(&p("255.255.255.255/32")).unwrap();
        assert!(trie.contains("255.255.255.255".parse().unwrap()).unwrap());
        assert!(!trie.contains("255.255.255.254".parse().unwrap()).unwrap());
        assert_eq!(
            trie.covered_networks().unwrap(),
            vec![p("255.255.255.255/32")]
        );
    }

    #[test]
    fn test_family_mismatch_is_structural_error() {
        let mut trie = PrefixTrie::new(Family::Ipv4);
        assert_eq!(trie.family(), Family::Ipv4);
        let err = trie.insert(&p("2001:db8::/32")).unwrap_err();
        assert!(matches!(err, AggregateError::Structural(_)));
        assert!(trie.contains("::1".parse().unwrap()).is_err());
    }

    #[test]
    fn test_covered_networks_ascending() {
        let mut trie = PrefixTrie::new(Family::Ipv4);
        for s in ["192.0.2.6/31", "10.0.0.0/8", "192.0.2.0/30", "192.0.2.5/32"] {
            trie.insert(&p(s)).unwrap();
        }
        assert_eq!(
            trie.covered_networks().unwrap(),
            vec![
                p("10.0.0.0/8"),
                p("192.0.2.0/30"),
                p("192.0.2.5/32"),
                p("192.0.2.6/31"),
            ]
        );
    }

    #[test]
    fn test_covered_networks_skips_nested() {
        let mut trie = PrefixTrie::new(Family::Ipv4);
        trie.insert(&p("10.1.0.0/16")).unwrap();
        trie.insert(&p("10.0.0.0/8")).unwrap();
        assert_eq!(trie.covered_networks().unwrap(), vec![p("10.0.0.0/8")]);
    }

    #[test]
    fn test_ranger_dispatches_by_family() {
        let mut ranger = PrefixRanger::new();
        assert!(ranger.is_empty());
        ranger.insert(&p("2001:db8::/32")).unwrap();
        ranger.insert(&p("192.0.2.0/24")).unwrap();
        assert_eq!(ranger.len(), 2);
        assert!(ranger.contains("2001:db8::1".parse().unwrap()).unwrap());
        assert!(ranger.contains("192.0.2.1".parse().unwrap()).unwrap());
        assert!(!ranger.contains("::1".parse().unwrap()).unwrap());
        assert_eq!(
            ranger.covered_networks().unwrap(),
            vec![p("192.0.2.0/24"), p("2001:db8::/32")]
        );
    }
}
