//! Merging of buddy prefix pairs into their parent.

use crate::models::Prefix;

/// Replace buddy pairs by their parent until no pair is left.
///
/// `prefixes` must be free of overlaps and sorted by family then address, as
/// returned by [`remove_contained`](super::remove_contained). Buddies are then
/// always neighbours, so one pass with a stack reaches the fixed point: each
/// prefix is pushed, and while the two topmost entries are buddies they are
/// replaced by their parent, which is tested again against its new neighbour.
/// A missing half (a hole) leaves its sibling unmerged.
pub fn merge_adjacent(prefixes: Vec<Prefix>) -> Vec<Prefix> {
    let input_len = prefixes.len();
    let mut merged: Vec<Prefix> = Vec::with_capacity(input_len);

    for prefix in prefixes {
        merged.push(prefix);
        while merged.len() >= 2 {
            let right = merged[merged.len() - 1];
            let left = merged[merged.len() - 2];
            if !left.is_buddy_of(&right) {
                break;
            }
            let Some(parent) = left.parent() else {
                break;
            };
            log::trace!("merge {left} + {right} -> {parent}");
            merged.truncate(merged.len() - 2);
            merged.push(parent);
        }
    }

    log::debug!("merge_adjacent: {} in, {} out", input_len, merged.len());
    merged
}
