//! The two public aggregation entry points.

use super::{merge_adjacent, remove_contained};
use crate::error::AggregateError;
use crate::models::Prefix;
use crate::output::{format_prefixes, sort_prefixes};

/// Aggregate prefixes to the smallest set covering exactly the same addresses.
///
/// Output is IPv4 before IPv6, ascending by address within a family.
///
/// # Examples
/// ```
/// use cidr_aggregate::{aggregate, Prefix};
/// let input: Vec<Prefix> = vec![
///     "192.0.2.0/25".parse().unwrap(),
///     "192.0.2.128/25".parse().unwrap(),
/// ];
/// let out = aggregate(input).unwrap();
/// assert_eq!(out, vec!["192.0.2.0/24".parse::<Prefix>().unwrap()]);
/// ```
pub fn aggregate<I>(prefixes: I) -> Result<Vec<Prefix>, AggregateError>
where
    I: IntoIterator<Item = Prefix>,
{
    let prefixes: Vec<Prefix> = prefixes.into_iter().collect();
    if prefixes.is_empty() {
        return Ok(vec![]);
    }
    let contained = remove_contained(prefixes)?;
    let mut merged = merge_adjacent(contained);
    sort_prefixes(&mut merged);
    Ok(merged)
}

/// Parse CIDR strings, aggregate them and format the result back to strings.
///
/// The first string that fails to parse aborts the call.
pub fn aggregate_text<I, S>(prefixes: I) -> Result<Vec<String>, AggregateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = prefixes
        .into_iter()
        .map(|s| s.as_ref().parse::<Prefix>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format_prefixes(&aggregate(parsed)?))
}
