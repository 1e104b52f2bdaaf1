//! State backend error types
//!
//! Error codes:
//! - INFO_STATE_READ_FAILED (ERROR severity)
//! - INFO_STATE_WRITE_FAILED (ERROR severity)
//! - INFO_STATE_QUERY_FAILED (ERROR severity)
//! - INFO_STATE_ITERATION_FAILED (ERROR severity)
//! - INFO_DATA_CORRUPTION (FATAL severity)
//! - INFO_STATE_UNRECOVERABLE (FATAL severity)

use std::fmt;
use std::io;

/// Severity levels for state errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, service continues
    Error,
    /// Service must terminate
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// State-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateErrorCode {
    /// Point read failed
    InfoStateReadFailed,
    /// Write failed
    InfoStateWriteFailed,
    /// Selector query could not be executed
    InfoStateQueryFailed,
    /// Advancing a query iterator failed
    InfoStateIterationFailed,
    /// Persisted state failed checksum or framing validation
    InfoDataCorruption,
    /// A failed write could not be rolled back; the log tail is unknown
    InfoStateUnrecoverable,
}

impl StateErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StateErrorCode::InfoStateReadFailed => "INFO_STATE_READ_FAILED",
            StateErrorCode::InfoStateWriteFailed => "INFO_STATE_WRITE_FAILED",
            StateErrorCode::InfoStateQueryFailed => "INFO_STATE_QUERY_FAILED",
            StateErrorCode::InfoStateIterationFailed => "INFO_STATE_ITERATION_FAILED",
            StateErrorCode::InfoDataCorruption => "INFO_DATA_CORRUPTION",
            StateErrorCode::InfoStateUnrecoverable => "INFO_STATE_UNRECOVERABLE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StateErrorCode::InfoDataCorruption | StateErrorCode::InfoStateUnrecoverable => {
                Severity::Fatal
            }
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StateErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// State backend error with context
#[derive(Debug)]
pub struct StateError {
    code: StateErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StateError {
    fn new(code: StateErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Point read failed
    pub fn read_failed(message: impl Into<String>) -> Self {
        Self::new(StateErrorCode::InfoStateReadFailed, message)
    }

    /// Point read failed with an I/O cause
    pub fn read_failed_io(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::read_failed(message)
        }
    }

    /// Write failed
    pub fn write_failed(message: impl Into<String>) -> Self {
        Self::new(StateErrorCode::InfoStateWriteFailed, message)
    }

    /// Write failed with an I/O cause
    pub fn write_failed_io(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::write_failed(message)
        }
    }

    /// Selector query failed
    pub fn query_failed(message: impl Into<String>) -> Self {
        Self::new(StateErrorCode::InfoStateQueryFailed, message)
    }

    /// Iterator advance failed
    pub fn iteration_failed(message: impl Into<String>) -> Self {
        Self::new(StateErrorCode::InfoStateIterationFailed, message)
    }

    /// Log could not be restored after a failed append (FATAL)
    pub fn unrecoverable_io(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StateErrorCode::InfoStateUnrecoverable, message)
        }
    }

    /// Store refuses writes after an unrecoverable failure (FATAL)
    pub fn unrecoverable(message: impl Into<String>) -> Self {
        Self::new(StateErrorCode::InfoStateUnrecoverable, message)
    }

    /// Corruption at a byte offset of the state log (FATAL)
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            details: Some(format!("byte_offset: {}", offset)),
            ..Self::new(StateErrorCode::InfoDataCorruption, reason)
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StateErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether this error is fatal
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for state operations
pub type StateResult<T> = Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StateErrorCode::InfoStateReadFailed.code(), "INFO_STATE_READ_FAILED");
        assert_eq!(StateErrorCode::InfoStateWriteFailed.code(), "INFO_STATE_WRITE_FAILED");
        assert_eq!(StateErrorCode::InfoStateQueryFailed.code(), "INFO_STATE_QUERY_FAILED");
        assert_eq!(
            StateErrorCode::InfoStateIterationFailed.code(),
            "INFO_STATE_ITERATION_FAILED"
        );
        assert_eq!(StateErrorCode::InfoDataCorruption.code(), "INFO_DATA_CORRUPTION");
    }

    #[test]
    fn test_fatal_codes() {
        assert!(StateError::corruption_at_offset(0, "bad").is_fatal());
        assert!(StateError::unrecoverable("log tail unknown").is_fatal());
        assert_eq!(
            StateErrorCode::InfoStateUnrecoverable.code(),
            "INFO_STATE_UNRECOVERABLE"
        );
        assert!(!StateError::read_failed("x").is_fatal());
        assert!(!StateError::write_failed("x").is_fatal());
        assert!(!StateError::query_failed("x").is_fatal());
        assert!(!StateError::iteration_failed("x").is_fatal());
    }

    #[test]
    fn test_display_includes_cause() {
        let err = StateError::write_failed_io(
            "Failed to append key 1",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        let display = err.to_string();
        assert!(display.contains("INFO_STATE_WRITE_FAILED"));
        assert!(display.contains("Failed to append key 1"));
        assert!(display.contains("disk full"));
    }

    #[test]
    fn test_corruption_display_has_offset() {
        let err = StateError::corruption_at_offset(1024, "checksum mismatch");
        let display = err.to_string();
        assert!(display.contains("FATAL"));
        assert!(display.contains("byte_offset: 1024"));
    }
}
