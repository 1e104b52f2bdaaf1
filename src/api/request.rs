//! API request types
//!
//! An invocation is a function name plus a flat, ordered list of string arguments.
//! Over the serving loop it arrives as one JSON object per line:
//!
//! ```text
//! {"function": "queryByGroup", "args": ["airforce"]}
//! ```

use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use crate::record::Attribute;

/// Operations the dispatcher understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Create,
    ReadById,
    QueryByCategory,
    QueryBySubmitter,
    QueryByGroup,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::Create,
        Function::ReadById,
        Function::QueryByCategory,
        Function::QueryBySubmitter,
        Function::QueryByGroup,
    ];

    /// Resolves a function name or its legacy alias
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "create" | "initInfo" => Some(Function::Create),
            "readById" | "readInfo" => Some(Function::ReadById),
            "queryByCategory" | "queryInfoByInfoType" => Some(Function::QueryByCategory),
            "queryBySubmitter" | "queryInfoByUploader" => Some(Function::QueryBySubmitter),
            "queryByGroup" | "queryInfoByDepartment" => Some(Function::QueryByGroup),
            _ => None,
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Function::Create => "create",
            Function::ReadById => "readById",
            Function::QueryByCategory => "queryByCategory",
            Function::QueryBySubmitter => "queryBySubmitter",
            Function::QueryByGroup => "queryByGroup",
        }
    }

    /// The attribute a query function filters on
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            Function::QueryByCategory => Some(Attribute::Category),
            Function::QueryBySubmitter => Some(Attribute::Submitter),
            Function::QueryByGroup => Some(Attribute::Group),
            Function::Create | Function::ReadById => None,
        }
    }
}

/// One invocation as received on the wire.
///
/// The function name is kept as given; resolving it is the dispatcher's job so an
/// unknown name is reported as such rather than as a malformed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Request {
    pub fn new(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }

    /// Parse a request from a JSON line
    pub fn parse(json: &str) -> ApiResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid request: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorCode;

    #[test]
    fn test_names_and_aliases_resolve() {
        for function in Function::ALL {
            assert_eq!(Function::from_name(function.name()), Some(function));
        }
        assert_eq!(Function::from_name("initInfo"), Some(Function::Create));
        assert_eq!(Function::from_name("readInfo"), Some(Function::ReadById));
        assert_eq!(
            Function::from_name("queryInfoByDepartment"),
            Some(Function::QueryByGroup)
        );
        assert_eq!(Function::from_name("deleteInfo"), None);
        assert_eq!(Function::from_name("ReadById"), None);
    }

    #[test]
    fn test_query_functions_name_attribute() {
        assert_eq!(
            Function::QueryBySubmitter.attribute(),
            Some(Attribute::Submitter)
        );
        assert_eq!(Function::Create.attribute(), None);
    }

    #[test]
    fn test_parse_request() {
        let req = Request::parse(r#"{"function": "readById", "args": ["420106"]}"#).unwrap();
        assert_eq!(req, Request::new("readById", vec!["420106".into()]));
    }

    #[test]
    fn test_missing_args_default_to_empty() {
        let req = Request::parse(r#"{"function": "readById"}"#).unwrap();
        assert!(req.args.is_empty());
    }

    #[test]
    fn test_malformed_requests_rejected() {
        for line in [
            "not json",
            r#"{"args": ["1"]}"#,
            r#"{"function": "readById", "args": [1]}"#,
        ] {
            let err = Request::parse(line).unwrap_err();
            assert_eq!(err.code(), ApiErrorCode::InfoInvalidRequest, "{}", line);
        }
    }
}
