//! HTTP implementation of the remote deep-search delegate
//!
//! POSTs `{"query", "limitPerModule"}` as JSON to the configured endpoint and
//! expects a JSON object shaped like a search result back. Anything else
//! (transport error, non-2xx status, non-JSON or non-object body) is an error,
//! which the engine turns into a local fallback.

use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::Value;

use super::{DeepSearchRequest, RemoteDelegate};
use crate::config::RemoteConfig;
use crate::search::errors::{SearchError, SearchResult};

#[derive(Debug, Clone)]
pub struct HttpRemoteDelegate {
    client: Client,
    config: RemoteConfig,
}

impl HttpRemoteDelegate {
    /// Build a delegate with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Http` if the TLS backend cannot be initialized.
    pub fn new(config: RemoteConfig) -> SearchResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    /// Reuse an existing client (connection pool shared with the host)
    pub fn with_client(client: Client, config: RemoteConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    async fn call(&self, request: DeepSearchRequest) -> SearchResult<Value> {
        let mut builder = self
            .client
            .post(self.config.endpoint().clone())
            .timeout(self.config.timeout())
            .header("Accept", "application/json")
            .json(&request);
        if let Some(key) = self.config.api_key() {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::RemoteStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&body)
            .map_err(|e| SearchError::MalformedResponse(format!("invalid JSON body: {e}")))?;
        if !payload.is_object() {
            return Err(SearchError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        }
        Ok(payload)
    }
}

impl RemoteDelegate for HttpRemoteDelegate {
    fn deep_search(&self, request: DeepSearchRequest) -> BoxFuture<'_, SearchResult<Value>> {
        Box::pin(self.call(request))
    }
}
