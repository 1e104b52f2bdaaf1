//! API response types
//!
//! ```text
//! {"status":"ok","payload":<stored JSON or null>}
//! {"status":"error","code":"INFO_...","message":"..."}
//! ```
//!
//! Payloads are embedded verbatim when they are JSON. Opaque bytes (a value some
//! other writer put under the same key) are carried as a JSON string instead.

use serde::Serialize;
use serde_json::json;
use serde_json::value::RawValue;

use super::errors::ApiError;

/// Success response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessResponse {
    payload: Option<Vec<u8>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePayload {
    Json(Box<RawValue>),
    Opaque(String),
}

#[derive(Serialize)]
struct SuccessWire {
    status: &'static str,
    payload: Option<WirePayload>,
}

impl SuccessResponse {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    /// Success with no payload
    pub fn empty() -> Self {
        Self { payload: None }
    }

    /// Raw payload bytes exactly as produced by the operation
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    fn wire_payload(&self) -> Option<WirePayload> {
        let bytes = self.payload.as_ref()?;
        let text = String::from_utf8_lossy(bytes).into_owned();
        match RawValue::from_string(text.clone()) {
            Ok(raw) => Some(WirePayload::Json(raw)),
            Err(_) => Some(WirePayload::Opaque(text)),
        }
    }

    /// Convert to a JSON line
    pub fn to_json(&self) -> String {
        let wire = SuccessWire {
            status: "ok",
            payload: self.wire_payload(),
        };
        serde_json::to_string(&wire).unwrap_or_else(|e| {
            json!({
                "status": "error",
                "code": "INFO_SERIALIZATION_FAILURE",
                "message": e.to_string(),
            })
            .to_string()
        })
    }
}

/// Error response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Create from an API error
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            code: err.code().code().to_string(),
            message: err.message().to_string(),
        }
    }

    /// Convert to a JSON line
    pub fn to_json(&self) -> String {
        json!({
            "status": "error",
            "code": self.code,
            "message": self.message,
        })
        .to_string()
    }
}

/// Unified response type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    /// Success carrying raw bytes
    pub fn success(payload: Vec<u8>) -> Self {
        Response::Success(SuccessResponse::new(payload))
    }

    /// Success with no payload
    pub fn ok() -> Self {
        Response::Success(SuccessResponse::empty())
    }

    pub fn error(err: &ApiError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    pub fn to_json(&self) -> String {
        match self {
            Response::Success(r) => r.to_json(),
            Response::Error(r) => r.to_json(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Payload bytes of a success, if any
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Response::Success(r) => r.payload(),
            Response::Error(_) => None,
        }
    }

    /// Error code of a failure
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error(r) => Some(&r.code),
        }
    }

    /// Error message of a failure
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error(r) => Some(&r.message),
        }
    }
}
