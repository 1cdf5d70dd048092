//! Command line and environment configuration.
//!
//! Every option can also come from the environment; `.env` in the working
//! directory is loaded by `main` before the arguments are parsed.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output formats supported by the binary.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One prefix per line
    Text,
    /// JSON array of CIDR strings
    Json,
    /// Aligned table with address counts
    Table,
}

/// Aggregate IPv4/IPv6 CIDR prefixes into the smallest equivalent set
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Files holding prefixes; stdin is read when none are given
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        env = "CIDR_AGGREGATE_FORMAT",
        default_value_t = OutputFormat::Text
    )]
    pub format: OutputFormat,

    /// log4rs configuration file
    #[arg(long, env = "CIDR_AGGREGATE_LOG_CONFIG", default_value = "log4rs.yml")]
    pub log_config: PathBuf,
}
