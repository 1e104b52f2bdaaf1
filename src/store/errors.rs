//! Record store errors

use serde_json::json;
use thiserror::Error;

use crate::record::RecordError;
use crate::state::StateError;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by create and read
#[derive(Debug, Error)]
pub enum StoreError {
    /// Create targeted an id that already holds a value
    #[error("This info already exists: {0}")]
    DuplicateKey(String),

    /// Existence check before create failed
    #[error("Failed to get info: {0}")]
    ExistenceCheck(#[source] StateError),

    /// Persisting the record failed
    #[error("{0}")]
    WriteFailed(#[source] StateError),

    /// Record could not be encoded
    #[error(transparent)]
    Encoding(#[from] RecordError),

    /// Read failed at the backend
    #[error("Failed to get state for {key}")]
    Unreadable {
        key: String,
        #[source]
        source: StateError,
    },

    /// Read found no value
    #[error("Info does not exist: {0}")]
    Missing(String),
}

impl StoreError {
    /// Structured `{"Error": "..."}` payload for read failures.
    ///
    /// `None` for create-side errors.
    pub fn not_found_payload(&self) -> Option<String> {
        match self {
            StoreError::Unreadable { .. } | StoreError::Missing(_) => {
                Some(json!({ "Error": self.to_string() }).to_string())
            }
            _ => None,
        }
    }
}
