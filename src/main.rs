//! recordkit CLI entry point
//!
//! Minimal entrypoint: everything, configuration and logging included, is
//! delegated to `cli::run`. Errors go to stderr with a non-zero exit status.

use recordkit::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
