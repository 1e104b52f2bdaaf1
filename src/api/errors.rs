//! API error types
//!
//! Every failure leaving the dispatcher carries a stable `INFO_*` code, a message
//! and a severity. Lower-layer errors are converted here; their cause text is kept
//! in the message.

use std::fmt;

use crate::query::QueryError;
use crate::record::RecordError;
use crate::state::StateError;
use crate::store::StoreError;

/// API error severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recoverable error
    Error,
    /// Backend state is unusable
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

/// API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Wrong number of positional arguments
    InfoArgumentCount,
    /// A required argument is blank
    InfoArgumentEmpty,
    /// Create targeted an existing id
    InfoDuplicateKey,
    /// Read found nothing (or could not read)
    InfoNotFound,
    /// The backend failed
    InfoBackendFailure,
    /// A record could not be encoded or embedded
    InfoSerializationFailure,
    /// The function name is not recognised
    InfoUnknownFunction,
    /// The request line is malformed
    InfoInvalidRequest,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::InfoArgumentCount => "INFO_ARGUMENT_COUNT",
            ApiErrorCode::InfoArgumentEmpty => "INFO_ARGUMENT_EMPTY",
            ApiErrorCode::InfoDuplicateKey => "INFO_DUPLICATE_KEY",
            ApiErrorCode::InfoNotFound => "INFO_NOT_FOUND",
            ApiErrorCode::InfoBackendFailure => "INFO_BACKEND_FAILURE",
            ApiErrorCode::InfoSerializationFailure => "INFO_SERIALIZATION_FAILURE",
            ApiErrorCode::InfoUnknownFunction => "INFO_UNKNOWN_FUNCTION",
            ApiErrorCode::InfoInvalidRequest => "INFO_INVALID_REQUEST",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned to the caller of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: ApiErrorCode,
    message: String,
    severity: Severity,
}

impl ApiError {
    fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn backend(message: impl Into<String>, cause: &StateError) -> Self {
        let mut err = Self::new(ApiErrorCode::InfoBackendFailure, message);
        if cause.is_fatal() {
            err.severity = Severity::Fatal;
        }
        err
    }

    /// Malformed request line
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InfoInvalidRequest, reason)
    }

    /// The function name did not resolve
    pub fn unknown_function() -> Self {
        Self::new(
            ApiErrorCode::InfoUnknownFunction,
            "Received unknown function invocation",
        )
    }

    pub fn code(&self) -> ApiErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Fatal)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        let code = match err {
            RecordError::ArgumentCount { .. } => ApiErrorCode::InfoArgumentCount,
            RecordError::ArgumentEmpty { .. } => ApiErrorCode::InfoArgumentEmpty,
            RecordError::Encoding(_) => ApiErrorCode::InfoSerializationFailure,
        };
        Self::new(code, err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if let Some(payload) = err.not_found_payload() {
            return Self::new(ApiErrorCode::InfoNotFound, payload);
        }

        match err {
            StoreError::DuplicateKey(_) => Self::new(ApiErrorCode::InfoDuplicateKey, err.to_string()),
            StoreError::Encoding(inner) => inner.into(),
            StoreError::ExistenceCheck(ref cause) | StoreError::WriteFailed(ref cause) => {
                Self::backend(err.to_string(), cause)
            }
            StoreError::Unreadable { ref source, .. } => Self::backend(err.to_string(), source),
            StoreError::Missing(_) => Self::new(ApiErrorCode::InfoNotFound, err.to_string()),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Execution(ref cause) | QueryError::Iteration(ref cause) => {
                Self::backend(err.to_string(), cause)
            }
            QueryError::InvalidRecord { .. } | QueryError::Encoding(_) => {
                Self::new(ApiErrorCode::InfoSerializationFailure, err.to_string())
            }
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
