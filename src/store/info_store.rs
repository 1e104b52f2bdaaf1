//! Write-once record store over a key-value backend
//!
//! Create flow:
//! 1. Existence check (`get`)
//! 2. Encode record
//! 3. Conditional write (`put`)
//!
//! There is no update or delete path. Atomicity of the check + write pair per key
//! is the backend's (or the serializing caller's) responsibility.

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::record::InfoRecord;
use crate::state::StateStore;

use super::errors::{StoreError, StoreResult};

/// Record store enforcing create-if-absent
pub struct InfoStore<S> {
    state: S,
}

impl<S: StateStore> InfoStore<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// Returns the underlying backend
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Persists `record` under its id unless the id already exists.
    ///
    /// # Errors
    ///
    /// - `ExistenceCheck` if the backend read fails
    /// - `DuplicateKey` if a value is already stored (never overwritten)
    /// - `Encoding` if the record cannot be serialized
    /// - `WriteFailed` if the backend write fails
    pub fn create(&self, record: &InfoRecord) -> StoreResult<()> {
        Logger::trace("CREATE_BEGIN", &[("key", &record.id)]);

        let existing = self
            .state
            .get(&record.id)
            .map_err(StoreError::ExistenceCheck)?;
        if existing.is_some() {
            return Err(StoreError::DuplicateKey(record.id.clone()));
        }

        let bytes = record.to_bytes()?;

        self.state
            .put(&record.id, &bytes)
            .map_err(StoreError::WriteFailed)?;

        log_event_with_fields(
            Event::RecordCreated,
            &[("bytes", &bytes.len().to_string()), ("key", &record.id)],
        );
        Ok(())
    }

    /// Returns the stored bytes for `id` exactly as written.
    ///
    /// # Errors
    ///
    /// - `Unreadable` if the backend read fails
    /// - `Missing` if no value exists
    pub fn read(&self, id: &str) -> StoreResult<Vec<u8>> {
        match self.state.get(id) {
            Ok(Some(bytes)) => {
                Logger::trace(Event::RecordRead.as_str(), &[("key", id)]);
                Ok(bytes)
            }
            Ok(None) => Err(StoreError::Missing(id.to_string())),
            Err(source) => Err(StoreError::Unreadable {
                key: id.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStateStore;
    use std::sync::Arc;

    fn store() -> InfoStore<Arc<MemoryStateStore>> {
        InfoStore::new(Arc::new(MemoryStateStore::new()))
    }

    #[test]
    fn test_create_then_read_returns_written_bytes() {
        let store = store();
        let record = InfoRecord::new("420106", "Weather", "sunny", "10:10", "Bob", "AirForce");

        store.create(&record).unwrap();

        let bytes = store.read("420106").unwrap();
        assert_eq!(bytes, record.to_bytes().unwrap());

        let decoded = InfoRecord::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.category, "weather");
        assert_eq!(decoded.submitter, "bob");
        assert_eq!(decoded.group, "airforce");
    }

    #[test]
    fn test_duplicate_create_rejected_and_first_kept() {
        let store = store();
        let first = InfoRecord::new("1", "a", "b", "c", "d", "e");
        let second = InfoRecord::new("1", "x", "y", "z", "w", "v");

        store.create(&first).unwrap();
        let err = store.create(&second).unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey(ref key) if key == "1"));
        assert_eq!(store.read("1").unwrap(), first.to_bytes().unwrap());
    }

    #[test]
    fn test_existing_foreign_value_blocks_create() {
        let store = store();
        store.state().put("shared", b"not an info record").unwrap();

        let err = store
            .create(&InfoRecord::new("shared", "a", "b", "c", "d", "e"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
        assert_eq!(store.read("shared").unwrap(), b"not an info record".to_vec());
    }

    #[test]
    fn test_read_passes_through_foreign_bytes() {
        let store = store();
        store.state().put("raw", b"\x00\x01 opaque").unwrap();
        assert_eq!(store.read("raw").unwrap(), b"\x00\x01 opaque".to_vec());
    }

    #[test]
    fn test_read_missing() {
        let err = store().read("nope").unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
        assert_eq!(
            err.not_found_payload().unwrap(),
            r#"{"Error":"Info does not exist: nope"}"#
        );
    }

    #[test]
    fn test_read_backend_failure_is_not_found_shape() {
        let store = store();
        store.state().set_fail_reads(true);

        let err = store.read("1").unwrap_err();
        assert!(matches!(err, StoreError::Unreadable { .. }));
        assert_eq!(
            err.not_found_payload().unwrap(),
            r#"{"Error":"Failed to get state for 1"}"#
        );
    }

    #[test]
    fn test_existence_check_failure_writes_nothing() {
        let store = store();
        store.state().set_fail_reads(true);

        let err = store
            .create(&InfoRecord::new("1", "a", "b", "c", "d", "e"))
            .unwrap_err();
        assert!(matches!(err, StoreError::ExistenceCheck(_)));

        store.state().set_fail_reads(false);
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_write_failure_surfaces_cause() {
        let store = store();
        store.state().set_fail_writes(true);

        let err = store
            .create(&InfoRecord::new("1", "a", "b", "c", "d", "e"))
            .unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
        assert!(err.to_string().contains("State unavailable for key 1"));

        store.state().set_fail_writes(false);
        assert!(matches!(store.read("1"), Err(StoreError::Missing(_))));
    }
}
