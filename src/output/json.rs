//! JSON output.

use crate::models::Prefix;

/// Serialize prefixes as a pretty-printed JSON array of CIDR strings.
pub fn to_json(prefixes: &[Prefix]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(prefixes)
}
