//! The info record schema
//!
//! Wire form (field order is fixed):
//!
//! ```text
//! {"docType":"info","InfoID":"420106","InfoType":"weather","Content":"sunny",
//!  "UploadTime":"10:10","Uploader":"bob","Department":"airforce"}
//! ```

use serde::{Deserialize, Serialize};

use super::errors::{RecordError, RecordResult};
use super::validator;

/// Discriminator carried by every info record
pub const DOC_TYPE: &str = "info";

/// Number of positional arguments accepted by create
pub const CREATE_ARG_COUNT: usize = 6;

/// A persisted info record.
///
/// `category`, `submitter` and `group` are always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoRecord {
    #[serde(rename = "docType")]
    pub doc_type: String,
    #[serde(rename = "InfoID")]
    pub id: String,
    #[serde(rename = "InfoType")]
    pub category: String,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "UploadTime")]
    pub timestamp: String,
    #[serde(rename = "Uploader")]
    pub submitter: String,
    #[serde(rename = "Department")]
    pub group: String,
}

impl InfoRecord {
    /// Builds a record, lowercasing category, submitter and group.
    ///
    /// Does not check for empty fields; see [`InfoRecord::from_args`].
    pub fn new(
        id: impl Into<String>,
        category: &str,
        content: impl Into<String>,
        timestamp: impl Into<String>,
        submitter: &str,
        group: &str,
    ) -> Self {
        Self {
            doc_type: DOC_TYPE.to_string(),
            id: id.into(),
            category: category.to_lowercase(),
            content: content.into(),
            timestamp: timestamp.into(),
            submitter: submitter.to_lowercase(),
            group: group.to_lowercase(),
        }
    }

    /// Validates create arguments and builds the record.
    ///
    /// Order: `id, category, content, timestamp, submitter, group`. The count is
    /// checked first, then each argument left to right.
    pub fn from_args(args: &[String]) -> RecordResult<Self> {
        validator::expect_exactly(args, CREATE_ARG_COUNT, "Expecting 6")?;
        validator::require_non_empty(args, CREATE_ARG_COUNT)?;

        Ok(Self::new(
            args[0].as_str(),
            &args[1],
            args[2].as_str(),
            args[3].as_str(),
            &args[4],
            &args[5],
        ))
    }

    /// Canonical JSON encoding
    pub fn to_bytes(&self) -> RecordResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RecordError::Encoding(e.to_string()))
    }

    /// Decodes a stored record
    pub fn from_bytes(raw: &[u8]) -> RecordResult<Self> {
        serde_json::from_slice(raw).map_err(|e| RecordError::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalizes_filterable_fields_only() {
        let record = InfoRecord::from_args(&args(&[
            "ID-9", "Weather", "Sunny DAY", "10:10", "Bob", "AirForce",
        ]))
        .unwrap();

        assert_eq!(record.doc_type, DOC_TYPE);
        assert_eq!(record.id, "ID-9");
        assert_eq!(record.category, "weather");
        assert_eq!(record.content, "Sunny DAY");
        assert_eq!(record.timestamp, "10:10");
        assert_eq!(record.submitter, "bob");
        assert_eq!(record.group, "airforce");
    }

    #[test]
    fn test_wire_field_order() {
        let record = InfoRecord::new("420106", "weather", "sunny", "10:10", "bob", "airforce");
        let json = String::from_utf8(record.to_bytes().unwrap()).unwrap();

        assert_eq!(
            json,
            r#"{"docType":"info","InfoID":"420106","InfoType":"weather","Content":"sunny","UploadTime":"10:10","Uploader":"bob","Department":"airforce"}"#
        );
    }

    #[test]
    fn test_from_bytes_reads_wire_form() {
        let record = InfoRecord::new("1", "a", "b", "c", "d", "e");
        let decoded = InfoRecord::from_bytes(&record.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, record);

        assert!(InfoRecord::from_bytes(b"{\"InfoID\":1}").is_err());
    }

    #[test]
    fn test_wrong_count_checked_before_emptiness() {
        let err = InfoRecord::from_args(&args(&["", "", ""])).unwrap_err();
        assert_eq!(err.to_string(), "Incorrect number of arguments. Expecting 6");
    }

    #[test]
    fn test_each_empty_position_named() {
        for position in 0..CREATE_ARG_COUNT {
            let mut values = args(&["1", "a", "b", "c", "d", "e"]);
            values[position].clear();

            let err = InfoRecord::from_args(&values).unwrap_err();
            assert_eq!(err, RecordError::argument_empty(position + 1));
        }
    }

    #[test]
    fn test_unicode_lowercasing() {
        let record = InfoRecord::new("1", "WETTER", "x", "y", "ÄRGER", "ÉQUIPE");
        assert_eq!(record.category, "wetter");
        assert_eq!(record.submitter, "ärger");
        assert_eq!(record.group, "équipe");
    }
}
