//! Selector evaluation against stored documents
//!
//! Exact string equality only. No type coercion, no case folding.

use serde_json::Value;

use super::ast::{FieldEq, Selector};

/// Evaluates selectors against JSON documents
pub struct SelectorFilter;

impl SelectorFilter {
    /// Checks if a document matches every predicate of the selector
    pub fn matches(document: &Value, selector: &Selector) -> bool {
        !selector.is_empty()
            && selector
                .predicates()
                .iter()
                .all(|pred| Self::matches_predicate(document, pred))
    }

    /// Parses raw stored bytes and evaluates the selector.
    ///
    /// Bytes that are not a JSON object never match.
    pub fn matches_bytes(raw: &[u8], selector: &Selector) -> bool {
        match serde_json::from_slice::<Value>(raw) {
            Ok(document) if document.is_object() => Self::matches(&document, selector),
            _ => false,
        }
    }

    fn matches_predicate(document: &Value, predicate: &FieldEq) -> bool {
        // Missing field, null, or non-string = no match
        match document.get(&predicate.field) {
            Some(Value::String(actual)) => actual == &predicate.value,
            _ => false,
        }
    }
}
