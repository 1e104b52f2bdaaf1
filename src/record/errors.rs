//! Record validation and encoding errors

use thiserror::Error;

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors raised while validating arguments or encoding a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Wrong number of positional arguments
    #[error("Incorrect number of arguments. {expecting}")]
    ArgumentCount { expecting: String },

    /// A required positional argument is blank (1-based position)
    #[error("{ordinal} argument must be a non-empty string")]
    ArgumentEmpty { position: usize, ordinal: String },

    /// The record could not be encoded or decoded
    #[error("Failed to encode info record: {0}")]
    Encoding(String),
}

impl RecordError {
    pub fn argument_count(expecting: impl Into<String>) -> Self {
        RecordError::ArgumentCount {
            expecting: expecting.into(),
        }
    }

    /// Blank argument at 1-based `position`
    pub fn argument_empty(position: usize) -> Self {
        RecordError::ArgumentEmpty {
            position,
            ordinal: ordinal(position),
        }
    }
}

/// English ordinal for a 1-based position: 1st, 2nd, 3rd, 4th, ... 11th, 21st
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
