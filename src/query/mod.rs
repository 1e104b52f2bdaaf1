//! Query engine
//!
//! One generic equality-filter scan backs every attribute query
//! (category, submitter, group). Results are `{"Key", "Record"}` envelopes.

mod engine;
mod errors;
mod result;

pub use engine::QueryEngine;
pub use errors::{QueryError, QueryResult};
pub use result::{encode_envelopes, QueryEnvelope};
