use http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use spin::RwLock;
use std::sync::Arc;

use crate::{BoxError, Error, Operation, Result};

/// A step run on every operation before it is sent.
///
/// Links are applied in the order they were added to the
/// [`ClientBuilder`](struct.ClientBuilder.html).
/// Each link receives the operation produced by the previous one and may add headers to the
/// outgoing request. Returning an error stops the chain and no request is sent.
#[async_trait::async_trait]
pub trait Link: Send + Sync {
    /// Inspect or rewrite the operation.
    async fn apply(&self, operation: Operation, headers: &mut HeaderMap) -> Result<Operation>;
}

#[async_trait::async_trait]
impl<L: Link + ?Sized> Link for Arc<L> {
    async fn apply(&self, operation: Operation, headers: &mut HeaderMap) -> Result<Operation> {
        (**self).apply(operation, headers).await
    }
}

/// A link made from a synchronous function.
///
/// # Examples
///
/// ```
/// use graphql_multipart_client::*;
/// use ::http::{HeaderMap, HeaderValue};
///
/// let link = FnLink::new(|operation, headers: &mut HeaderMap| {
///     headers.insert("x-client-name", HeaderValue::from_static("dashboard"));
///     Ok(operation)
/// });
/// ```
pub struct FnLink<F>(F);

impl<F> FnLink<F>
where
    F: Fn(Operation, &mut HeaderMap) -> Result<Operation> + Send + Sync,
{
    /// Create a link calling `f` on every operation.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait::async_trait]
impl<F> Link for FnLink<F>
where
    F: Fn(Operation, &mut HeaderMap) -> Result<Operation> + Send + Sync,
{
    async fn apply(&self, operation: Operation, headers: &mut HeaderMap) -> Result<Operation> {
        (self.0)(operation, headers)
    }
}

/// The session of the signed-in user.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// The access token of the current session, if any.
    async fn token(&self) -> Result<Option<String>, BoxError>;
}

#[async_trait::async_trait]
impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    async fn token(&self) -> Result<Option<String>, BoxError> {
        (**self).token().await
    }
}

/// A credential store kept in memory.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    /// Create a store holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Replace the stored token.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Forget the stored token.
    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn token(&self) -> Result<Option<String>, BoxError> {
        Ok(self.token.read().clone())
    }
}

/// Sends the token of the current session as a bearer `Authorization` header.
///
/// Operations are sent without the header while no token is stored.
pub struct AuthLink<S> {
    store: S,
}

impl<S: CredentialStore> AuthLink<S> {
    /// Create a link reading tokens from `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: CredentialStore> Link for AuthLink<S> {
    async fn apply(&self, operation: Operation, headers: &mut HeaderMap) -> Result<Operation> {
        if let Some(token) = self.store.token().await.map_err(Error::Link)? {
            let mut value =
                HeaderValue::try_from(format!("Bearer {}", token)).map_err(Error::link)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn test_auth_link() {
        let store = Arc::new(MemoryCredentialStore::default());
        let link = AuthLink::new(store.clone());

        let mut headers = HeaderMap::new();
        link.apply(Operation::new("{ a }"), &mut headers).await.unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());

        store.set_token("abc");
        let mut headers = HeaderMap::new();
        let operation = link.apply(Operation::new("{ a }"), &mut headers).await.unwrap();
        assert_eq!(operation, Operation::new("{ a }"));
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert!(headers[AUTHORIZATION].is_sensitive());

        store.clear();
        let mut headers = HeaderMap::new();
        link.apply(Operation::new("{ a }"), &mut headers).await.unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[async_std::test]
    async fn test_auth_link_invalid_token() {
        let link = AuthLink::new(MemoryCredentialStore::with_token("bad\ntoken"));
        let mut headers = HeaderMap::new();
        let err = link
            .apply(Operation::new("{ a }"), &mut headers)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Link(_)));
    }

    #[async_std::test]
    async fn test_fn_link() {
        let link = FnLink::new(|operation: Operation, _: &mut HeaderMap| {
            Ok(operation.operation_name("Renamed"))
        });
        let operation = link
            .apply(Operation::new("{ a }"), &mut HeaderMap::new())
            .await
            .unwrap();
        assert_eq!(operation.operation_name.as_deref(), Some("Renamed"));
    }
}
