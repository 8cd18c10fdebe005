use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Client, ClientBuilder, Transport};

/// Client settings which can be loaded from a configuration file.
///
/// # Examples
///
/// ```
/// use graphql_multipart_client::*;
///
/// let config: ClientConfig = serde_json::from_str(r#"{
///     "endpoint": "https://api.example.com/graphql",
///     "headers": { "x-client-name": "dashboard" }
/// }"#).unwrap();
/// assert!(config.require_preflight);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Absolute URL of the GraphQL endpoint.
    pub endpoint: String,

    /// Headers sent with every request.
    #[serde(default)]
    pub headers: IndexMap<String, String>,

    /// Whether to send the `apollo-require-preflight` header.
    #[serde(default = "default_require_preflight")]
    pub require_preflight: bool,
}

fn default_require_preflight() -> bool {
    true
}

impl ClientConfig {
    /// Create a configuration for `endpoint` with default settings.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: IndexMap::new(),
            require_preflight: true,
        }
    }

    /// Create a client builder from these settings.
    pub fn into_builder<T: Transport>(self, transport: T) -> ClientBuilder<T> {
        self.headers.into_iter().fold(
            Client::builder(self.endpoint, transport).require_preflight(self.require_preflight),
            |builder, (name, value)| builder.header(name, value),
        )
    }
}
