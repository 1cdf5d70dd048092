//! Aggregate IPv4/IPv6 CIDR prefixes into the smallest set of prefixes that
//! covers exactly the same addresses.
//!
//! ```
//! let out = cidr_aggregate::aggregate_text(["192.0.2.0/25", "192.0.2.128/25"]).unwrap();
//! assert_eq!(out, vec!["192.0.2.0/24"]);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use config::OutputFormat;
use std::error::Error;
use std::io::BufRead;
use std::path::PathBuf;

pub use error::AggregateError;
pub use models::{Family, Prefix};
pub use processing::{aggregate, aggregate_text};

/// Read prefixes from each file in turn, or from stdin when `files` is empty.
pub fn read_input(files: &[PathBuf]) -> Result<Vec<Prefix>, input::InputError> {
    if files.is_empty() {
        let stdin = std::io::stdin();
        return read_stdin(stdin.lock());
    }
    let mut prefixes = Vec::new();
    for file in files {
        prefixes.extend(input::read_prefix_file(file)?);
    }
    Ok(prefixes)
}

fn read_stdin<R: BufRead>(reader: R) -> Result<Vec<Prefix>, input::InputError> {
    log::info!("Reading prefixes from stdin");
    input::read_prefixes(reader, "stdin")
}

/// Render aggregated prefixes in the requested format.
pub fn render_output(
    format: OutputFormat,
    input_count: usize,
    prefixes: &[Prefix],
) -> Result<String, Box<dyn Error>> {
    let rendered = match format {
        OutputFormat::Text => output::format_lines(prefixes),
        OutputFormat::Json => output::to_json(prefixes)?,
        OutputFormat::Table => output::render_table(input_count, prefixes).join("\n"),
    };
    Ok(rendered)
}
