//! reqwest transport for graphql-multipart-client.
//!
//! ```no_run
//! use graphql_multipart_client::{Client, Operation};
//! use graphql_multipart_client_reqwest::ReqwestTransport;
//!
//! # async fn run() -> graphql_multipart_client::Result<()> {
//! let client = Client::builder("http://localhost:8000/graphql", ReqwestTransport::new()).build()?;
//! let _response = client.send(Operation::new("{ categories { id } }")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use bytes::Bytes;
use graphql_multipart_client::http::{MultipartForm, RequestBody};
use graphql_multipart_client::{BoxError, Transport};
use reqwest::multipart::{Form, Part};

/// A [`Transport`] sending requests with a `reqwest` client.
///
/// Multipart bodies are streamed by `reqwest`, which generates the boundary and the
/// `content-type` header.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport using an existing client, for example one configured with a timeout.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: http::Request<RequestBody>,
    ) -> Result<http::Response<Bytes>, BoxError> {
        let (parts, body) = request.into_parts();
        let builder = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers);
        let builder = match body {
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Multipart(form) => builder.multipart(into_form(form)?),
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let version = resp.version();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;
        tracing::trace!(
            target: "graphql_multipart_client_reqwest",
            %status,
            len = body.len(),
            "Response body read"
        );

        let mut response = http::Response::new(body);
        *response.status_mut() = status;
        *response.version_mut() = version;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

fn into_form(form: MultipartForm) -> Result<Form, reqwest::Error> {
    let mut multipart = Form::new()
        .text("operations", form.operations)
        .text("map", form.map);
    for (name, upload) in form.files {
        let mut part = Part::stream_with_length(upload.content().clone(), upload.len() as u64)
            .file_name(upload.filename().to_string());
        if let Some(content_type) = upload.content_type() {
            part = part.mime_str(content_type)?;
        }
        multipart = multipart.part(name, part);
    }
    Ok(multipart)
}
