//! infoshare CLI entry point
//!
//! Parses arguments and hands off to `cli::run`. Errors are printed to stderr and
//! the process exits non-zero. Configuration, backend boot and serving all live in
//! the CLI module.

use infoshare::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
