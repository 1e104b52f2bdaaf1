//! Info record schema
//!
//! - [`InfoRecord`]: the only entity, keyed by its id
//! - [`Attribute`]: the secondary attributes queries filter on
//! - [`validator`]: positional argument checks shared by every operation

mod attribute;
mod errors;
mod info;
pub mod validator;

pub use attribute::Attribute;
pub use errors::{ordinal, RecordError, RecordResult};
pub use info::{InfoRecord, CREATE_ARG_COUNT, DOC_TYPE};
