//! Fluent builder for `SearchConfig`
//!
//! Every field has a default from `utils::constants`; `build()` rejects
//! combinations the engine cannot honour.

use anyhow::{Result, bail};

use super::types::SearchConfig;
use crate::utils::{
    MIN_QUERY_CHARS, RECENCY_CACHE_CAPACITY, RECENCY_POOL_SIZE, RECENCY_TTL_MS, REMOTE_TIMEOUT_MS,
    RESULT_CACHE_CAPACITY, RESULT_TTL_MS, RESULTS_PER_MODULE,
};

#[derive(Debug, Clone)]
pub struct SearchConfigBuilder {
    pub(crate) min_query_chars: usize,
    pub(crate) results_per_module: usize,
    pub(crate) recency_pool_size: usize,
    pub(crate) recency_ttl_ms: u64,
    pub(crate) result_ttl_ms: u64,
    pub(crate) recency_cache_capacity: usize,
    pub(crate) result_cache_capacity: usize,
    pub(crate) remote_timeout_ms: u64,
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self {
            min_query_chars: MIN_QUERY_CHARS,
            results_per_module: RESULTS_PER_MODULE,
            recency_pool_size: RECENCY_POOL_SIZE,
            recency_ttl_ms: RECENCY_TTL_MS,
            result_ttl_ms: RESULT_TTL_MS,
            recency_cache_capacity: RECENCY_CACHE_CAPACITY,
            result_cache_capacity: RESULT_CACHE_CAPACITY,
            remote_timeout_ms: REMOTE_TIMEOUT_MS,
        }
    }
}

impl SearchConfig {
    /// Create a builder for configuring a `SearchConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl SearchConfigBuilder {
    #[must_use]
    pub fn min_query_chars(mut self, chars: usize) -> Self {
        self.min_query_chars = chars;
        self
    }

    #[must_use]
    pub fn results_per_module(mut self, limit: usize) -> Self {
        self.results_per_module = limit;
        self
    }

    #[must_use]
    pub fn recency_pool_size(mut self, size: usize) -> Self {
        self.recency_pool_size = size;
        self
    }

    #[must_use]
    pub fn recency_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.recency_ttl_ms = ttl_ms;
        self
    }

    #[must_use]
    pub fn result_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.result_ttl_ms = ttl_ms;
        self
    }

    #[must_use]
    pub fn recency_cache_capacity(mut self, capacity: usize) -> Self {
        self.recency_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn result_cache_capacity(mut self, capacity: usize) -> Self {
        self.result_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn remote_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.remote_timeout_ms = timeout_ms;
        self
    }

    /// Validate and produce the config
    ///
    /// # Errors
    ///
    /// Returns an error when a limit is zero or the recency pool is smaller
    /// than the per-module result cap.
    pub fn build(self) -> Result<SearchConfig> {
        if self.min_query_chars == 0 {
            bail!("min_query_chars must be at least 1");
        }
        if self.results_per_module == 0 {
            bail!("results_per_module must be at least 1");
        }
        if self.recency_pool_size < self.results_per_module {
            bail!(
                "recency_pool_size ({}) must be >= results_per_module ({})",
                self.recency_pool_size,
                self.results_per_module
            );
        }
        if self.recency_cache_capacity == 0 || self.result_cache_capacity == 0 {
            bail!("cache capacities must be at least 1");
        }
        if self.remote_timeout_ms == 0 {
            bail!("remote_timeout_ms must be positive");
        }
        Ok(self.into_config())
    }

    pub(crate) fn into_config(self) -> SearchConfig {
        SearchConfig {
            min_query_chars: self.min_query_chars,
            results_per_module: self.results_per_module,
            recency_pool_size: self.recency_pool_size,
            recency_ttl_ms: self.recency_ttl_ms,
            result_ttl_ms: self.result_ttl_ms,
            recency_cache_capacity: self.recency_cache_capacity,
            result_cache_capacity: self.result_cache_capacity,
            remote_timeout_ms: self.remote_timeout_ms,
        }
    }
}
