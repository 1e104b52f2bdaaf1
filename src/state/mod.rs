//! Key-value state backends
//!
//! The record store and query engine only ever talk to the backend through the
//! traits in this module:
//!
//! - [`StateStore`]: `get` / `put` by key
//! - [`SelectorQuery`]: secondary-index query by selector string, yielding a
//!   [`StateQueryIterator`]
//!
//! Two implementations are bundled:
//!
//! - [`MemoryStateStore`]: `BTreeMap` behind a `RwLock`, for tests and ephemeral use
//! - [`FileStateStore`]: append-only, checksummed log replayed on open
//!
//! Query results are point-in-time snapshots. They may be stale by the time a
//! caller acts on them and must not drive writes without re-validation.

mod checksum;
mod errors;
mod file;
mod iterator;
mod log;
mod memory;

pub use errors::{Severity, StateError, StateErrorCode, StateResult};
pub use file::FileStateStore;
pub use iterator::SnapshotIterator;
pub use log::{LogEntry, LogReader};
pub use memory::MemoryStateStore;

use std::sync::Arc;

/// One (key, value) pair yielded by a selector query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Point access to committed state.
///
/// `get` returns `Ok(None)` when the key does not exist.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> StateResult<Option<Vec<u8>>>;

    fn put(&self, key: &str, value: &[u8]) -> StateResult<()>;
}

/// Lazy sequence of query results.
///
/// Callers must `close()` the iterator on every exit path.
pub trait StateQueryIterator {
    fn has_next(&self) -> bool;

    fn next_entry(&mut self) -> StateResult<KeyValue>;

    fn close(&mut self) -> StateResult<()>;
}

/// Secondary-index query capability
pub trait SelectorQuery: Send + Sync {
    /// Executes a backend-native selector query string
    fn query_by_selector(&self, query: &str) -> StateResult<Box<dyn StateQueryIterator + '_>>;
}

/// A backend offering both point access and selector queries
pub trait StateBackend: StateStore + SelectorQuery {}

impl<T: StateStore + SelectorQuery + ?Sized> StateBackend for T {}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn get(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StateResult<()> {
        (**self).put(key, value)
    }
}

impl<T: SelectorQuery + ?Sized> SelectorQuery for Arc<T> {
    fn query_by_selector(&self, query: &str) -> StateResult<Box<dyn StateQueryIterator + '_>> {
        (**self).query_by_selector(query)
    }
}
