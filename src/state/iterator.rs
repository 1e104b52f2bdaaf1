//! Point-in-time query iterator shared by the bundled backends

use std::collections::{BTreeMap, VecDeque};

use super::errors::{StateError, StateResult};
use super::{KeyValue, StateQueryIterator};
use crate::selector::{Selector, SelectorFilter};

/// Iterator over results captured when the query executed.
///
/// Later writes are not observed.
#[derive(Debug, Default)]
pub struct SnapshotIterator {
    pending: VecDeque<KeyValue>,
    closed: bool,
}

impl SnapshotIterator {
    pub fn new(results: Vec<KeyValue>) -> Self {
        Self {
            pending: results.into(),
            closed: false,
        }
    }

    /// Evaluates `query` over `entries`, capturing matches in key order
    pub fn scan(entries: &BTreeMap<String, Vec<u8>>, query: &str) -> StateResult<Self> {
        let selector = Selector::parse(query)
            .map_err(|e| StateError::query_failed(format!("Malformed selector: {}", e)))?;

        let results = entries
            .iter()
            .filter(|(_, value)| SelectorFilter::matches_bytes(value, &selector))
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect();

        Ok(Self::new(results))
    }
}

impl StateQueryIterator for SnapshotIterator {
    fn has_next(&self) -> bool {
        !self.closed && !self.pending.is_empty()
    }

    fn next_entry(&mut self) -> StateResult<KeyValue> {
        if self.closed {
            return Err(StateError::iteration_failed("Iterator already closed"));
        }
        self.pending
            .pop_front()
            .ok_or_else(|| StateError::iteration_failed("Iterator exhausted"))
    }

    fn close(&mut self) -> StateResult<()> {
        self.closed = true;
        self.pending.clear();
        Ok(())
    }
}
