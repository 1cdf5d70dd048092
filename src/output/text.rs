//! Canonical CIDR text output.

use crate::models::Prefix;
use itertools::Itertools;

/// Sort into output order: IPv4 before IPv6, then ascending address, then
/// ascending length.
pub fn sort_prefixes(prefixes: &mut [Prefix]) {
    prefixes.sort();
}

/// Render each prefix as canonical CIDR text, keeping the given order.
pub fn format_prefixes(prefixes: &[Prefix]) -> Vec<String> {
    prefixes.iter().map(|p| p.to_string()).collect()
}

/// One prefix per line, without a trailing newline.
pub fn format_lines(prefixes: &[Prefix]) -> String {
    prefixes.iter().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Vec<Prefix> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_sort_prefixes() {
        let mut list = parse(&[
            "2001:db8::/32",
            "192.0.2.6/31",
            "::/0",
            "192.0.2.5/32",
            "192.0.2.0/30",
            "10.0.0.0/8",
        ]);
        sort_prefixes(&mut list);
        assert_eq!(
            format_prefixes(&list),
            vec![
                "10.0.0.0/8",
                "192.0.2.0/30",
                "192.0.2.5/32",
                "192.0.2.6/31",
                "::/0",
                "2001:db8::/32"
            ]
        );
    }

    #[test]
    fn test_format_lines() {
        let list = parse(&["192.0.2.0/24", "2001:db8::/32"]);
        assert_eq!(format_lines(&list), "192.0.2.0/24\n2001:db8::/32");
        assert_eq!(format_lines(&[]), "");
    }
}
