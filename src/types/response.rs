use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A GraphQL response as returned by the server.
///
/// A response carrying `errors` is still a successful round trip; interpreting GraphQL errors is
/// left to the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    /// Data of the query result.
    #[serde(default)]
    pub data: serde_json::Value,

    /// Errors reported by the server.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<ServerError>,

    /// Extensions result.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Response {
    /// Returns `true` if the response is ok.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if the response is error.
    #[inline]
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Extract the error from the response. Only if the `errors` field is empty will this return
    /// `Ok`.
    #[inline]
    pub fn into_result(self) -> Result<Self, Vec<ServerError>> {
        if self.is_err() {
            Err(self.errors)
        } else {
            Ok(self)
        }
    }
}

/// An error reported by the server in the `errors` field of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    /// An explanatory message of the error.
    pub message: String,
    /// Where the error occurred.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub locations: Vec<Pos>,
    /// If the error occurred in a resolver, the path to the error.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub path: Vec<PathSegment>,
    /// Extensions to the error.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A line and column in a query source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    /// One-based line number.
    pub line: usize,
    /// One-based column number.
    pub column: usize,
}

/// A segment of the path to an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An index in a list.
    Index(usize),
    /// A field name.
    Field(String),
}
