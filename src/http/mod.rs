//! Encoding operations as HTTP requests.

mod multipart;

use ::http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use ::http::{Method, Request, Uri};
use bytes::Bytes;
use serde::Serialize;

use crate::extract::extract_files;
use crate::{Error, Operation, Result};

pub use multipart::{build_index_map, MultipartForm, MultipartIndexMap};

/// Header telling the server the request was not sent by a simple CORS form, which servers
/// require before accepting multipart uploads.
pub const REQUIRE_PREFLIGHT: HeaderName = HeaderName::from_static("apollo-require-preflight");

/// The body of an encoded operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A JSON document, sent with `content-type: application/json`.
    Json(Bytes),
    /// A `multipart/form-data` form. The transport sets the content type and boundary.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns `true` if this is a multipart body.
    #[inline]
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }

    /// Number of files carried by the body.
    pub fn file_count(&self) -> usize {
        match self {
            RequestBody::Json(_) => 0,
            RequestBody::Multipart(form) => form.files.len(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OperationBody<'a> {
    operation_name: Option<&'a str>,
    query: &'a str,
    variables: &'a serde_json::Map<String, serde_json::Value>,
}

/// Options applied to every encoded request.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Headers added to the request.
    pub headers: HeaderMap,
    /// Whether to send the `apollo-require-preflight` header.
    pub require_preflight: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            require_preflight: true,
        }
    }
}

/// Encode an operation as a `POST` request to `endpoint`.
///
/// Operations without files are encoded as JSON. Otherwise the request is a multipart form with
/// the `operations` and `map` fields followed by one part per file. No content type is set for
/// multipart requests since the boundary is chosen by the transport.
pub fn encode_request(
    endpoint: &Uri,
    operation: &Operation,
    options: &EncodeOptions,
) -> Result<Request<RequestBody>> {
    let extracted = extract_files(&operation.variables)?;
    let operations = serde_json::to_string(&OperationBody {
        operation_name: operation.operation_name.as_deref(),
        query: &operation.query,
        variables: &extracted.variables,
    })
    .map_err(Error::Encode)?;

    let mut builder = Request::builder().method(Method::POST).uri(endpoint.clone());
    if let Some(headers) = builder.headers_mut() {
        headers.extend(options.headers.clone());
        if options.require_preflight {
            headers.insert(REQUIRE_PREFLIGHT, HeaderValue::from_static("true"));
        }
        set_content_type(headers, extracted.is_plain());
    }

    let body = if extracted.is_plain() {
        RequestBody::Json(operations.into())
    } else {
        RequestBody::Multipart(
            MultipartForm::new(operations, extracted.files).map_err(Error::Encode)?,
        )
    };

    Ok(builder.body(body)?)
}

/// Replace any content type set by the caller: JSON bodies get exactly `application/json`,
/// multipart bodies get none so the transport can add its boundary.
pub(crate) fn set_content_type(headers: &mut HeaderMap, json: bool) {
    if json {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    } else {
        headers.remove(CONTENT_TYPE);
    }
}
