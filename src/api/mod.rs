//! API layer for infoshare
//!
//! The dispatcher turns a named function plus flat string arguments into a call on
//! the record store or the query engine, behind a single global lock.
//!
//! # Supported functions
//!
//! | Function | Alias | Args |
//! |---|---|---|
//! | `create` | `initInfo` | id, category, content, timestamp, submitter, group |
//! | `readById` | `readInfo` | id |
//! | `queryByCategory` | `queryInfoByInfoType` | category |
//! | `queryBySubmitter` | `queryInfoByUploader` | submitter |
//! | `queryByGroup` | `queryInfoByDepartment` | group |

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult, Severity};
pub use handler::InfoShareHandler;
pub use request::{Function, Request};
pub use response::{ErrorResponse, Response, SuccessResponse};
