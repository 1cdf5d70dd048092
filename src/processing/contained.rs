//! Removal of prefixes already covered by another prefix.

use super::trie::PrefixRanger;
use crate::error::AggregateError;
use crate::models::Prefix;

/// Drop every prefix whose range is covered by another prefix in the set,
/// exact duplicates included.
///
/// The result is grouped by family (IPv4 first) and ascending by address
/// within each family.
pub fn remove_contained(mut prefixes: Vec<Prefix>) -> Result<Vec<Prefix>, AggregateError> {
    // Shortest first, so a covering prefix is always inserted before anything
    // it covers.
    prefixes.sort_by_key(|p| (p.prefix_len(), p.family()));

    let mut ranger = PrefixRanger::new();
    let mut skipped = 0;
    for prefix in &prefixes {
        if ranger.contains(prefix.addr())? {
            log::trace!("skip {prefix}, already covered");
            skipped += 1;
            continue;
        }
        ranger.insert(prefix)?;
    }

    let networks = ranger.covered_networks()?;
    log::debug!(
        "remove_contained: {} in, {} covered, {} out",
        prefixes.len(),
        skipped,
        networks.len()
    );
    Ok(networks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Vec<Prefix> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn strings(list: &[Prefix]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_empty() {
        assert!(remove_contained(vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_contained_by_default_route() {
        let out = remove_contained(parse(&["192.0.2.0/24", "0.0.0.0/0"])).unwrap();
        assert_eq!(strings(&out), vec!["0.0.0.0/0"]);
    }

    #[test]
    fn test_duplicates() {
        let out = remove_contained(parse(&["192.0.2.0/24", "192.0.2.0/24"])).unwrap();
        assert_eq!(strings(&out), vec!["192.0.2.0/24"]);
    }

    #[test]
    fn test_transitive_containment() {
        let out = remove_contained(parse(&[
            "10.1.1.0/24",
            "10.1.0.0/16",
            "10.0.0.0/8",
            "10.1.1.128/25",
        ]))
        .unwrap();
        assert_eq!(strings(&out), vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_siblings_are_kept_in_address_order() {
        let out = remove_contained(parse(&[
            "192.0.2.128/25",
            "2001:db8::/48",
            "192.0.2.0/25",
            "2001:db8::/32",
            "172.16.0.0/12",
        ]))
        .unwrap();
        assert_eq!(
            strings(&out),
            vec![
                "172.16.0.0/12",
                "192.0.2.0/25",
                "192.0.2.128/25",
                "2001:db8::/32"
            ]
        );
    }

    #[test]
    fn test_families_do_not_cover_each_other() {
        let out = remove_contained(parse(&["::/0", "0.0.0.0/0", "::ffff:0:0/96"])).unwrap();
        assert_eq!(strings(&out), vec!["0.0.0.0/0", "::/0"]);
    }
}
