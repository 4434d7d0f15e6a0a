//! Getter methods for configuration types

use std::time::Duration;
use url::Url;

use super::types::{RemoteConfig, SearchConfig};

impl SearchConfig {
    #[must_use]
    pub fn min_query_chars(&self) -> usize {
        self.min_query_chars
    }

    #[must_use]
    pub fn results_per_module(&self) -> usize {
        self.results_per_module
    }

    #[must_use]
    pub fn recency_pool_size(&self) -> usize {
        self.recency_pool_size
    }

    #[must_use]
    pub fn recency_ttl_ms(&self) -> u64 {
        self.recency_ttl_ms
    }

    #[must_use]
    pub fn result_ttl_ms(&self) -> u64 {
        self.result_ttl_ms
    }

    #[must_use]
    pub fn recency_cache_capacity(&self) -> usize {
        self.recency_cache_capacity
    }

    #[must_use]
    pub fn result_cache_capacity(&self) -> usize {
        self.result_cache_capacity
    }

    #[must_use]
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }
}

impl RemoteConfig {
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Bearer token sent with every request, if any
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
