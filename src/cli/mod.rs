//! CLI module for infoshare
//!
//! Provides command-line interface for:
//! - init: Create directory structure
//! - start: Boot and enter the serving loop
//! - invoke: One-shot function invocation

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot, init, invoke, is_initialized, run, run_command, serve, start};
pub use config::{BackendKind, Config};
pub use errors::{CliError, CliResult};
pub use io::{read_requests, write_line};
