use http::StatusCode;
use thiserror::Error;

use crate::VariablePath;

/// A boxed error produced by a transport, link or credential store.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An alias for `Result<T, Error>`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error which stopped an operation from producing a response.
///
/// GraphQL errors returned inside a well-formed response are not represented here; they are part
/// of [`Response::errors`](struct.Response.html#structfield.errors).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The transport failed to deliver the request or to read the response.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-success status code.
    #[error("Unexpected status code {status}: {body}")]
    Status {
        /// The status code of the response.
        status: StatusCode,
        /// The response body, decoded lossily.
        body: String,
    },

    /// The response body is not a valid GraphQL response.
    #[error("Invalid response body: {0}")]
    ResponseParse(#[source] serde_json::Error),

    /// The operation could not be serialized.
    #[error("Failed to encode operation: {0}")]
    Encode(#[source] serde_json::Error),

    /// Two files resolved to the same path in the variables, e.g. a key containing a `.`
    /// next to a nested object of the same name.
    #[error("More than one file at path {0}")]
    DuplicateFilePath(VariablePath),

    /// The endpoint is not an absolute URL.
    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// A header or the endpoint could not be used to build a request.
    #[error("Invalid request: {0}")]
    Request(#[from] http::Error),

    /// A link rejected the operation.
    #[error("Link error: {0}")]
    Link(#[source] BoxError),

    /// The request was aborted before a response arrived.
    #[error("Request cancelled")]
    Cancelled,
}

impl Error {
    /// Create a link error from any error type.
    pub fn link(err: impl Into<BoxError>) -> Self {
        Error::Link(err.into())
    }

    /// Returns `true` if the request was cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
