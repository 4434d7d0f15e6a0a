//! Core configuration types for the search engine
//!
//! Durations are stored as integer milliseconds so a config round-trips
//! through JSON unchanged.

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::utils::REMOTE_TIMEOUT_MS;

/// Engine-wide limits and cache lifetimes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Normalized queries shorter than this return the empty result untouched
    pub(crate) min_query_chars: usize,
    /// Cap on ranked entries per list module
    pub(crate) results_per_module: usize,
    /// Documents pulled per module on a recency cache miss
    pub(crate) recency_pool_size: usize,
    pub(crate) recency_ttl_ms: u64,
    pub(crate) result_ttl_ms: u64,
    pub(crate) recency_cache_capacity: usize,
    pub(crate) result_cache_capacity: usize,
    /// Upper bound on one remote delegate call before falling back
    pub(crate) remote_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::builder().into_config()
    }
}

/// Endpoint and credentials for [`crate::backend::HttpRemoteDelegate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub(crate) endpoint: Url,
    pub(crate) api_key: Option<String>,
    pub(crate) timeout_ms: u64,
}

impl RemoteConfig {
    /// Parse and validate the endpoint
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint is not an absolute http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| anyhow!("Invalid remote endpoint '{endpoint}': {e}"))?;
        match endpoint.scheme() {
            "http" | "https" => {}
            other => bail!("Remote endpoint must be http or https, got '{other}'"),
        }
        Ok(Self {
            endpoint,
            api_key: None,
            timeout_ms: REMOTE_TIMEOUT_MS,
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
