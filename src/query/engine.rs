//! Attribute query engine
//!
//! Execution flow (strict order):
//! 1. Lowercase the query value
//! 2. Build the equality selector (`docType` + attribute field)
//! 3. Execute against the backend's selector index
//! 4. Drain the iterator, wrapping each hit as a `{Key, Record}` envelope
//! 5. Close the iterator (on every path, including errors)
//!
//! Results are all-or-nothing: any iteration failure discards what was collected.

use crate::observability::{log_event_at, log_event_with_fields, Event, Logger, Severity};
use crate::record::{Attribute, DOC_TYPE};
use crate::selector::Selector;
use crate::state::{SelectorQuery, StateQueryIterator};

use super::errors::{QueryError, QueryResult};
use super::result::{encode_envelopes, QueryEnvelope};

/// Closes the wrapped iterator when dropped
struct IteratorGuard<'a> {
    inner: Box<dyn StateQueryIterator + 'a>,
}

impl<'a> IteratorGuard<'a> {
    fn new(inner: Box<dyn StateQueryIterator + 'a>) -> Self {
        Self { inner }
    }

    fn drain(&mut self) -> QueryResult<Vec<QueryEnvelope>> {
        let mut envelopes = Vec::new();
        while self.inner.has_next() {
            let entry = self.inner.next_entry().map_err(QueryError::Iteration)?;
            envelopes.push(QueryEnvelope::from_entry(entry)?);
        }
        Ok(envelopes)
    }
}

impl Drop for IteratorGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.inner.close() {
            Logger::warn("QUERY_ITERATOR_CLOSE_FAILED", &[("error", &e.to_string())]);
        }
    }
}

/// Generic equality-filter scan over a selector-capable backend
pub struct QueryEngine<Q> {
    backend: Q,
}

impl<Q: SelectorQuery> QueryEngine<Q> {
    pub fn new(backend: Q) -> Self {
        Self { backend }
    }

    /// Returns every info record whose `attribute` equals `value`, case-insensitively.
    ///
    /// Records of another `docType`, and values that are not JSON objects, never
    /// match. Order is whatever the backend yields.
    pub fn query_by_attribute(
        &self,
        attribute: Attribute,
        value: &str,
    ) -> QueryResult<Vec<QueryEnvelope>> {
        let normalized = value.to_lowercase();
        let selector = Selector::for_attribute(DOC_TYPE, attribute.field_name(), &normalized);

        log_event_with_fields(
            Event::QueryBegin,
            &[("attribute", attribute.as_str()), ("value", &normalized)],
        );

        self.execute(&selector)
    }

    /// Same as [`query_by_attribute`](Self::query_by_attribute), encoded as a JSON array
    pub fn query_json(&self, attribute: Attribute, value: &str) -> QueryResult<Vec<u8>> {
        let envelopes = self.query_by_attribute(attribute, value)?;
        encode_envelopes(&envelopes)
    }

    fn execute(&self, selector: &Selector) -> QueryResult<Vec<QueryEnvelope>> {
        let query = selector.to_query_string();
        Logger::trace("QUERY_SELECTOR", &[("selector", &query)]);

        let iterator = match self.backend.query_by_selector(&query) {
            Ok(iterator) => iterator,
            Err(e) => return Err(self.failed(QueryError::Execution(e))),
        };

        let mut guard = IteratorGuard::new(iterator);
        match guard.drain() {
            Ok(envelopes) => {
                log_event_with_fields(
                    Event::QueryComplete,
                    &[("returned", &envelopes.len().to_string())],
                );
                Ok(envelopes)
            }
            Err(e) => Err(self.failed(e)),
        }
    }

    fn failed(&self, err: QueryError) -> QueryError {
        log_event_at(
            Severity::Error,
            Event::QueryFailed,
            &[("error", &err.to_string())],
        );
        err
    }
}
