//! CLI module for recordkit
//!
//! Provides command-line interface for:
//! - check: strict construction of JSON objects against a record type
//! - normalize: lenient construction, undeclared and null fields dropped
//! - describe: fields and defaults of a record type

mod args;
mod commands;
mod config;
mod errors;
mod io;

use tracing_subscriber::EnvFilter;

pub use args::{Cli, Command};
pub use commands::{check, describe, load_registry, normalize, run_command};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{open_input, read_values, write_error, write_response};

/// Environment variable overriding the configured log level
pub const LOG_ENV: &str = "RECORDKIT_LOG";

/// Parses arguments, loads configuration, installs logging and runs the command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(cli.config.as_deref())?;
    init_logging(&config);
    run_command(cli.command, &config)
}

/// Logs to stderr. `RECORDKIT_LOG` wins over the configured level.
fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
