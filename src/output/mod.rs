//! Output formatting for aggregated prefixes.
//!
//! - [`text`] - canonical CIDR text, one prefix per entry
//! - [`terminal`] - coloured table for interactive use
//! - [`json`] - JSON array of CIDR strings

mod json;
mod terminal;
mod text;

pub use json::to_json;
pub use terminal::{format_field, render_table};
pub use text::{format_lines, format_prefixes, sort_prefixes};
