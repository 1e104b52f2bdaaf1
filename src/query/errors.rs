//! Query engine errors

use thiserror::Error;

use crate::state::StateError;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that abort a scan. No partial results are ever returned.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The backend could not execute the selector
    #[error("Selector query failed: {0}")]
    Execution(#[source] StateError),

    /// Advancing the result iterator failed
    #[error("Query iteration failed: {0}")]
    Iteration(#[source] StateError),

    /// A matching value could not be embedded as a JSON document
    #[error("Record under key {key} is not a JSON document: {reason}")]
    InvalidRecord { key: String, reason: String },

    /// The envelope array could not be encoded
    #[error("Failed to encode query results: {0}")]
    Encoding(String),
}
