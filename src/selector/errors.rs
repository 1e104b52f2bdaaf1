//! Selector error types

use thiserror::Error;

/// Result type for selector operations
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Errors raised while parsing a backend-native selector query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Invalid selector JSON: {0}")]
    InvalidJson(String),

    #[error("Selector query must contain a \"selector\" object")]
    MissingSelector,

    #[error("Selector must constrain at least one field")]
    Empty,

    #[error("Unsupported operand for field '{0}': only string equality is supported")]
    UnsupportedOperand(String),
}
