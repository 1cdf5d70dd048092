//! Error types for prefix parsing and aggregation.

/// Errors raised while normalizing or aggregating prefixes.
///
/// Any error aborts the whole aggregation call; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// Malformed CIDR text, or a prefix length outside the family's range.
    #[error("Invalid prefix '{input}': {reason}")]
    Parse { input: String, reason: String },
    /// Insertion into or traversal of the prefix trie failed.
    #[error("Prefix trie error: {0}")]
    Structural(String),
}

impl AggregateError {
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        AggregateError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
