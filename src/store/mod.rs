//! Record store
//!
//! Wraps a [`StateStore`](crate::state::StateStore) and enforces the write-once
//! invariant: a record is created exactly once and read back byte-for-byte.

mod errors;
mod info_store;

pub use errors::{StoreError, StoreResult};
pub use info_store::InfoStore;
