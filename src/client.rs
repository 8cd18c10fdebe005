use futures_util::future::{AbortRegistration, Abortable};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Uri;
use std::sync::Arc;

use crate::http::{encode_request, set_content_type, EncodeOptions};
use crate::{Error, Link, Operation, Response, Result, Transport};

/// The last link of a chain: encodes the operation and sends it with a transport.
///
/// Each call performs exactly one `POST` request. The response body must be a GraphQL response;
/// a non-success status or a malformed body is an [`Error`](enum.Error.html), while GraphQL
/// errors in a well-formed body are returned in the [`Response`](struct.Response.html).
pub struct HttpLink<T> {
    endpoint: Uri,
    options: EncodeOptions,
    transport: T,
}

impl<T: Transport> HttpLink<T> {
    /// Create a link posting to `endpoint`.
    pub fn new(endpoint: Uri, transport: T) -> Self {
        Self {
            endpoint,
            options: EncodeOptions::default(),
            transport,
        }
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Send the operation with additional headers.
    pub async fn send(&self, operation: Operation, headers: HeaderMap) -> Result<Response> {
        let mut request = encode_request(&self.endpoint, &operation, &self.options)?;
        let json = !request.body().is_multipart();
        request.headers_mut().extend(headers);
        set_content_type(request.headers_mut(), json);

        let operation_name = operation.operation_name.as_deref().unwrap_or_default();
        tracing::debug!(
            target: "graphql_multipart_client",
            operation_name,
            multipart = request.body().is_multipart(),
            files = request.body().file_count(),
            "Sending GraphQL request"
        );

        let response = self.transport.execute(request).await.map_err(|err| {
            tracing::warn!(
                target: "graphql_multipart_client",
                operation_name,
                error = %err,
                "Transport error"
            );
            Error::Transport(err)
        })?;

        let status = response.status();
        tracing::debug!(
            target: "graphql_multipart_client",
            operation_name,
            %status,
            "Received GraphQL response"
        );
        if !status.is_success() {
            let body = String::from_utf8_lossy(response.body()).into_owned();
            tracing::warn!(
                target: "graphql_multipart_client",
                operation_name,
                %status,
                "Unexpected status code"
            );
            return Err(Error::Status { status, body });
        }

        serde_json::from_slice(response.body()).map_err(|err| {
            tracing::warn!(
                target: "graphql_multipart_client",
                operation_name,
                error = %err,
                "Invalid response body"
            );
            Error::ResponseParse(err)
        })
    }
}

/// A GraphQL client.
///
/// Runs its links in order, then sends the resulting operation with its
/// [`HttpLink`](struct.HttpLink.html). Clients are cheap to clone and calls do not share any
/// state, so concurrent operations are independent of each other.
pub struct Client<T> {
    links: Arc<[Arc<dyn Link>]>,
    http: Arc<HttpLink<T>>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            links: self.links.clone(),
            http: self.http.clone(),
        }
    }
}

impl<T: Transport> Client<T> {
    /// Create a client builder for `endpoint`.
    pub fn builder(endpoint: impl Into<String>, transport: T) -> ClientBuilder<T> {
        ClientBuilder {
            endpoint: endpoint.into(),
            links: Vec::new(),
            options: EncodeOptions::default(),
            invalid_header: None,
            transport,
        }
    }

    /// Send an operation and wait for its response.
    pub async fn send(&self, operation: Operation) -> Result<Response> {
        let mut headers = HeaderMap::new();
        let mut operation = operation;
        for link in self.links.iter() {
            operation = link.apply(operation, &mut headers).await?;
        }
        self.http.send(operation, headers).await
    }

    /// Send an operation which can be cancelled with the [`AbortHandle`](struct.AbortHandle.html)
    /// paired with `registration`.
    ///
    /// Aborting drops the in-flight request and returns
    /// [`Error::Cancelled`](enum.Error.html#variant.Cancelled).
    pub async fn send_abortable(
        &self,
        operation: Operation,
        registration: AbortRegistration,
    ) -> Result<Response> {
        match Abortable::new(self.send(operation), registration).await {
            Ok(res) => res,
            Err(_) => {
                tracing::debug!(target: "graphql_multipart_client", "GraphQL request cancelled");
                Err(Error::Cancelled)
            }
        }
    }
}

/// Client builder
pub struct ClientBuilder<T> {
    endpoint: String,
    links: Vec<Arc<dyn Link>>,
    options: EncodeOptions,
    invalid_header: Option<http::Error>,
    transport: T,
}

impl<T: Transport> ClientBuilder<T> {
    /// Add a link. Links run in the order they are added.
    #[must_use]
    pub fn link(mut self, link: impl Link + 'static) -> Self {
        self.links.push(Arc::new(link));
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        let header = HeaderName::try_from(name)
            .map_err(Into::<http::Error>::into)
            .and_then(|name| {
                let value = HeaderValue::try_from(value).map_err(Into::<http::Error>::into)?;
                Ok((name, value))
            });
        match header {
            Ok((name, value)) => {
                self.options.headers.append(name, value);
            }
            Err(err) => {
                self.invalid_header.get_or_insert(err);
            }
        }
        self
    }

    /// Whether to send the `apollo-require-preflight: true` header. Defaults to `true`.
    #[must_use]
    pub fn require_preflight(mut self, enabled: bool) -> Self {
        self.options.require_preflight = enabled;
        self
    }

    /// Build the client.
    ///
    /// Fails if the endpoint is not an absolute URL or a header is invalid.
    pub fn build(self) -> Result<Client<T>> {
        if let Some(err) = self.invalid_header {
            return Err(Error::Request(err));
        }
        let endpoint = parse_endpoint(&self.endpoint)?;
        let mut http = HttpLink::new(endpoint, self.transport);
        http.options = self.options;
        Ok(Client {
            links: self.links.into(),
            http: Arc::new(http),
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Uri> {
    let url = url::Url::parse(endpoint)?;
    Ok(Uri::try_from(url.as_str()).map_err(http::Error::from)?)
}
