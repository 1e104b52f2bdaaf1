//! Failures of the `infoshare` commands
//!
//! Every variant ends the process with exit status 1. Boot and invoke failures keep
//! the underlying state error or response code, so the printed line names the real
//! cause rather than a generic CLI failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::state::StateError;

#[derive(Debug, Error)]
pub enum CliError {
    /// The config file is missing, not JSON, or holds an invalid value
    #[error("{0}")]
    Config(String),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading requests or writing responses failed
    #[error("Request stream failed: {0}")]
    Io(#[from] io::Error),

    #[error("Data directory already initialized: {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Data directory not initialized: {}. Run 'infoshare init' first.", .0.display())]
    NotInitialized(PathBuf),

    /// The configured backend refused to open
    #[error("Failed to open state: {0}")]
    Boot(#[source] StateError),

    /// A one-shot invocation answered with an error response
    #[error("{function} failed with {code}: {message}")]
    Invoke {
        function: String,
        code: String,
        message: String,
    },
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Stable code printed ahead of the message
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "INFO_CLI_CONFIG_ERROR",
            Self::CreateDir { .. } | Self::Io(_) => "INFO_CLI_IO_ERROR",
            Self::AlreadyInitialized(_) => "INFO_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized(_) => "INFO_CLI_NOT_INITIALIZED",
            Self::Boot(_) => "INFO_CLI_BOOT_FAILED",
            Self::Invoke { .. } => "INFO_CLI_INVOKE_FAILED",
        }
    }

    /// True when the backend itself reported an unrecoverable condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Boot(e) if e.is_fatal())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
