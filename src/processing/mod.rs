//! Prefix aggregation logic.
//!
//! - [`contained`] - removal of covered prefixes
//! - [`merge`] - merging of buddy pairs into their parent
//! - [`trie`] - binary prefix trie backing the containment check

mod aggregate;
mod contained;
mod merge;
pub mod trie;

// Re-export public functions
pub use aggregate::{aggregate, aggregate_text};
pub use contained::remove_contained;
pub use merge::merge_adjacent;
