//! Terminal output utilities.
//!
//! Provides a coloured, aligned table of aggregated prefixes.

use crate::models::{Family, Prefix};
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    if value_str.len() >= width {
        value_str
    } else {
        format!("{value_str:>width$}")
    }
}

/// Address count as a number, or as a power of two once it gets unwieldy.
fn address_count(prefix: &Prefix) -> String {
    let host_bits = prefix.family().bits() - prefix.prefix_len();
    if host_bits <= 32 {
        prefix.num_addresses().to_string()
    } else {
        format!("2^{host_bits}")
    }
}

/// Render the table as lines: a header, one row per prefix and a summary.
///
/// # Arguments
/// * `input_count` - Number of prefixes read before aggregation
/// * `prefixes` - The aggregated prefixes, in output order
pub fn render_table(input_count: usize, prefixes: &[Prefix]) -> Vec<String> {
    let width = prefixes
        .iter()
        .map(|p| p.to_string().len())
        .max()
        .unwrap_or(0)
        .max("prefix".len());

    let mut lines = Vec::with_capacity(prefixes.len() + 2);
    lines.push(format!(
        "{}  {}  {}",
        format_field("prefix", width).bold(),
        format_field("family", 6).bold(),
        format_field("addresses", 12).bold()
    ));

    for prefix in prefixes {
        let family = format_field(prefix.family(), 6);
        let family = match prefix.family() {
            Family::Ipv4 => family.green(),
            Family::Ipv6 => family.cyan(),
        };
        lines.push(format!(
            "{}  {}  {}",
            format_field(prefix, width),
            family,
            format_field(address_count(prefix), 12)
        ));
    }

    let per_family = prefixes
        .iter()
        .counts_by(|p| p.family())
        .into_iter()
        .sorted()
        .map(|(family, count)| format!("{family}: {count}"))
        .join(", ");
    lines.push(format!(
        "# {input_count} in, {} out ({})",
        prefixes.len(),
        if per_family.is_empty() {
            "none".to_string()
        } else {
            per_family
        }
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "      test");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "long_value");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 4), "  42");
    }

    #[test]
    fn test_address_count() {
        let v4: Prefix = "192.0.2.0/24".parse().unwrap();
        let v6: Prefix = "2001:db8::/32".parse().unwrap();
        let v6_small: Prefix = "2001:db8::/120".parse().unwrap();
        assert_eq!(address_count(&v4), "256");
        assert_eq!(address_count(&v6), "2^96");
        assert_eq!(address_count(&v6_small), "256");
    }

    #[test]
    fn test_render_table() {
        colored::control::set_override(false);
        let prefixes: Vec<Prefix> = vec![
            "192.0.2.0/24".parse().unwrap(),
            "2001:db8::/32".parse().unwrap(),
        ];
        let lines = render_table(4, &prefixes);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "       prefix  family     addresses");
        assert_eq!(lines[1], " 192.0.2.0/24    IPv4           256");
        assert_eq!(lines[2], "2001:db8::/32    IPv6          2^96");
        assert_eq!(lines[3], "# 4 in, 2 out (IPv4: 1, IPv6: 1)");
    }

    #[test]
    fn test_render_table_empty() {
        colored::control::set_override(false);
        let lines = render_table(0, &[]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "# 0 in, 0 out (none)");
    }
}
