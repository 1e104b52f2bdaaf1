//! Declarative equality selectors
//!
//! Selectors are the only query language the backends understand: a conjunction of
//! `field == "string"` predicates, rendered as `{"selector":{...}}`. Callers of the
//! query engine never see this syntax; they only supply a value.

mod ast;
mod errors;
mod filter;

pub use ast::{FieldEq, Selector};
pub use errors::{SelectorError, SelectorResult};
pub use filter::SelectorFilter;
