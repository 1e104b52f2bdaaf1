//! In-memory state backend

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{StateError, StateResult};
use super::iterator::SnapshotIterator;
use super::{SelectorQuery, StateQueryIterator, StateStore};

/// `BTreeMap`-backed state with selector query support.
///
/// Failure switches let callers exercise the backend-failure paths of the layers
/// above without a real backend.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_queries: AtomicBool,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.read_entries().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes every subsequent `get` fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `put` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `query_by_selector` fail
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    fn read_entries(&self) -> StateResult<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries
            .read()
            .map_err(|_| StateError::read_failed("State lock poisoned"))
    }

    fn write_entries(&self) -> StateResult<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries
            .write()
            .map_err(|_| StateError::write_failed("State lock poisoned"))
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StateError::read_failed(format!(
                "State unavailable for key {}",
                key
            )));
        }
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StateResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StateError::write_failed(format!(
                "State unavailable for key {}",
                key
            )));
        }
        self.write_entries()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

impl SelectorQuery for MemoryStateStore {
    fn query_by_selector(&self, query: &str) -> StateResult<Box<dyn StateQueryIterator + '_>> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StateError::query_failed("Selector index unavailable"));
        }
        let entries = self.read_entries()?;
        Ok(Box::new(SnapshotIterator::scan(&entries, query)?))
    }
}
