use bytes::Bytes;
use std::sync::Arc;

use crate::http::RequestBody;
use crate::BoxError;

/// Sends encoded requests over the network.
///
/// An implementation performs exactly one request per call and returns the response whatever its
/// status code is. It must not retry. Multipart bodies must be written with a boundary chosen by
/// the implementation, and each file part must keep its filename and content type.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and read the whole response body.
    async fn execute(
        &self,
        request: http::Request<RequestBody>,
    ) -> Result<http::Response<Bytes>, BoxError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(
        &self,
        request: http::Request<RequestBody>,
    ) -> Result<http::Response<Bytes>, BoxError> {
        (**self).execute(request).await
    }
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn execute(
        &self,
        request: http::Request<RequestBody>,
    ) -> Result<http::Response<Bytes>, BoxError> {
        (**self).execute(request).await
    }
}
