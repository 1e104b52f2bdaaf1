//! CLI argument definitions using clap
//!
//! Commands:
//! - infoshare init --config <path>
//! - infoshare start --config <path>
//! - infoshare invoke --config <path> <function> [args...]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// infoshare - write-once info records with attribute queries
#[derive(Parser, Debug)]
#[command(name = "infoshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./infoshare.json")]
        config: PathBuf,
    },

    /// Serve line-delimited JSON invocations from stdin
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./infoshare.json")]
        config: PathBuf,
    },

    /// Invoke a single function and exit
    Invoke {
        /// Path to configuration file
        #[arg(long, default_value = "./infoshare.json")]
        config: PathBuf,

        /// Function name (e.g. create, readById, queryByGroup)
        function: String,

        /// Positional string arguments
        args: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
