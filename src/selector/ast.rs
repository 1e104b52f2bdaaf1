//! Selector structures
//!
//! A selector is a conjunction of field equality predicates. Its wire form is the
//! backend-native query string:
//!
//! ```text
//! {"selector":{"docType":"info","Department":"airforce"}}
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::errors::{SelectorError, SelectorResult};

/// A single equality predicate: `field == value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEq {
    /// Document field name
    pub field: String,
    /// Expected string value
    pub value: String,
}

impl FieldEq {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Declarative equality selector (AND of all predicates)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    predicates: Vec<FieldEq>,
}

impl Selector {
    /// Creates an empty selector
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector for `docType == doc_type AND field == value`
    pub fn for_attribute(
        doc_type: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new()
            .field_eq("docType", doc_type)
            .field_eq(field, value)
    }

    /// Adds (or replaces) an equality predicate on `field`
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.predicates.iter_mut().find(|p| p.field == field) {
            Some(existing) => existing.value = value,
            None => self.predicates.push(FieldEq { field, value }),
        }
        self
    }

    /// Returns the predicates in insertion order
    pub fn predicates(&self) -> &[FieldEq] {
        &self.predicates
    }

    /// Returns the expected value for `field`, if constrained
    pub fn value_for(&self, field: &str) -> Option<&str> {
        self.predicates
            .iter()
            .find(|p| p.field == field)
            .map(|p| p.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Renders the backend-native query string.
    ///
    /// Values are JSON-escaped, so caller input can never alter the selector shape.
    pub fn to_query_string(&self) -> String {
        let doc = QueryDocument {
            selector: PredicateMap(&self.predicates),
        };
        // Serializing string pairs into a JSON string cannot fail
        serde_json::to_string(&doc).unwrap_or_else(|_| String::from("{\"selector\":{}}"))
    }

    /// Parses a backend-native query string
    pub fn parse(query: &str) -> SelectorResult<Self> {
        let doc: Value =
            serde_json::from_str(query).map_err(|e| SelectorError::InvalidJson(e.to_string()))?;

        let fields = doc
            .get("selector")
            .and_then(Value::as_object)
            .ok_or(SelectorError::MissingSelector)?;

        if fields.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut selector = Selector::new();
        for (field, operand) in fields {
            let value = operand
                .as_str()
                .ok_or_else(|| SelectorError::UnsupportedOperand(field.clone()))?;
            selector = selector.field_eq(field.as_str(), value);
        }

        Ok(selector)
    }
}

#[derive(serde::Serialize)]
struct QueryDocument<'a> {
    selector: PredicateMap<'a>,
}

struct PredicateMap<'a>(&'a [FieldEq]);

impl Serialize for PredicateMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for predicate in self.0 {
            map.serialize_entry(&predicate.field, &predicate.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_keeps_insertion_order() {
        let selector = Selector::for_attribute("info", "Department", "airforce");
        assert_eq!(
            selector.to_query_string(),
            r#"{"selector":{"docType":"info","Department":"airforce"}}"#
        );
    }

    #[test]
    fn test_field_eq_replaces_existing() {
        let selector = Selector::new()
            .field_eq("Uploader", "bob")
            .field_eq("Uploader", "alice");
        assert_eq!(selector.predicates().len(), 1);
        assert_eq!(selector.value_for("Uploader"), Some("alice"));
    }

    #[test]
    fn test_values_are_escaped() {
        let selector = Selector::for_attribute("info", "InfoType", r#"x","docType":"other"#);
        let parsed = Selector::parse(&selector.to_query_string()).unwrap();

        assert_eq!(parsed.value_for("docType"), Some("info"));
        assert_eq!(parsed.value_for("InfoType"), Some(r#"x","docType":"other"#));
    }

    #[test]
    fn test_parse_roundtrip() {
        let selector = Selector::for_attribute("info", "Uploader", "bob");
        let parsed = Selector::parse(&selector.to_query_string()).unwrap();

        assert_eq!(parsed.value_for("docType"), Some("info"));
        assert_eq!(parsed.value_for("Uploader"), Some("bob"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = Selector::parse("{selector").unwrap_err();
        assert!(matches!(err, SelectorError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_rejects_missing_selector() {
        assert_eq!(
            Selector::parse(r#"{"fields":["InfoID"]}"#).unwrap_err(),
            SelectorError::MissingSelector
        );
        assert_eq!(
            Selector::parse(r#"{"selector":"docType"}"#).unwrap_err(),
            SelectorError::MissingSelector
        );
    }

    #[test]
    fn test_parse_rejects_empty_selector() {
        assert_eq!(
            Selector::parse(r#"{"selector":{}}"#).unwrap_err(),
            SelectorError::Empty
        );
    }

    #[test]
    fn test_parse_rejects_operators() {
        let err = Selector::parse(r#"{"selector":{"UploadTime":{"$gt":"10:00"}}}"#).unwrap_err();
        assert_eq!(err, SelectorError::UnsupportedOperand("UploadTime".into()));
    }
}
