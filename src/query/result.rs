//! Query result envelopes
//!
//! Each hit is wrapped as `{"Key": "<id>", "Record": <stored JSON>}`. The stored
//! bytes are embedded verbatim as a nested value, never re-escaped as a string.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::errors::{QueryError, QueryResult};
use crate::state::KeyValue;

/// One `{Key, Record}` element of a query result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEnvelope {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: Box<RawValue>,
}

impl QueryEnvelope {
    /// Wraps a backend hit, failing if the value is not JSON
    pub fn from_entry(entry: KeyValue) -> QueryResult<Self> {
        let KeyValue { key, value } = entry;

        let text = match String::from_utf8(value) {
            Ok(text) => text,
            Err(e) => {
                return Err(QueryError::InvalidRecord {
                    key,
                    reason: e.to_string(),
                })
            }
        };

        match RawValue::from_string(text) {
            Ok(record) => Ok(Self { key, record }),
            Err(e) => Err(QueryError::InvalidRecord {
                key,
                reason: e.to_string(),
            }),
        }
    }

    /// Returns the embedded record text exactly as stored
    pub fn record_json(&self) -> &str {
        self.record.get()
    }
}

/// Encodes envelopes as a JSON array; empty input encodes as `[]`
pub fn encode_envelopes(envelopes: &[QueryEnvelope]) -> QueryResult<Vec<u8>> {
    serde_json::to_vec(envelopes).map_err(|e| QueryError::Encoding(e.to_string()))
}
