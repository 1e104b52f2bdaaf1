//! infoshare - write-once info records with attribute queries
//!
//! Layers, leaves first:
//!
//! - [`observability`]: structured logging, events, counters
//! - [`selector`]: declarative equality selectors
//! - [`state`]: key-value backend boundary and the bundled backends
//! - [`record`]: the info record schema and argument validation
//! - [`store`]: create-if-absent and read-by-id
//! - [`query`]: equality-filter scans by attribute
//! - [`api`]: function dispatch behind a global lock
//! - [`cli`]: `init`, `start` and `invoke`

pub mod api;
pub mod cli;
pub mod observability;
pub mod query;
pub mod record;
pub mod selector;
pub mod state;
pub mod store;
