//! CLI argument definitions using clap
//!
//! Commands:
//! - recordkit check --type <T> [--input <file>]
//! - recordkit normalize --type <T> [--input <file>]
//! - recordkit describe [--type <T>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// recordkit - validate and normalize JSON against record definitions
#[derive(Parser, Debug)]
#[command(name = "recordkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: ./recordkit.json, optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Strictly construct a record from each input object
    Check {
        /// Record type name
        #[arg(long = "type", value_name = "TYPE")]
        record_type: String,

        /// Input file with one JSON object per line (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Keep only the declared, non-null fields of each input object
    Normalize {
        /// Record type name
        #[arg(long = "type", value_name = "TYPE")]
        record_type: String,

        /// Input file with one JSON object per line (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print the fields and defaults of a record type, or list every type
    Describe {
        /// Record type name
        #[arg(long = "type", value_name = "TYPE")]
        record_type: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
