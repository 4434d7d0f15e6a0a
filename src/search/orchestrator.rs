//! Public entry point of the search engine
//!
//! The orchestrator gates short queries, serves repeated requests from the
//! result cache and otherwise tries its strategies in priority order: the
//! remote deep search when a delegate is configured, then local search. A
//! search never fails from the caller's point of view; the worst case is the
//! canonical empty result.

use anyhow::{Result, anyhow};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::errors::SearchResult;
use super::modules::ModuleSearcher;
use super::normalize::SearchQuery;
use super::runtime_helpers::first_success;
use super::strategy::{LocalSearchStrategy, RemoteSearchStrategy, SearchContext, SearchStrategy};
use super::types::{Module, PermissionSet, SearchResponse};
use crate::backend::{DocumentStore, RemoteDelegate, StaffDirectory};
use crate::cache::{Clock, RecencyCache, ResultCache, ResultKey, SystemClock};
use crate::config::SearchConfig;

pub struct SearchOrchestrator {
    config: SearchConfig,
    strategies: Vec<Box<dyn SearchStrategy>>,
    recency: Arc<RecencyCache>,
    results: ResultCache,
    clock: Arc<dyn Clock>,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn builder() -> SearchOrchestratorBuilder {
        SearchOrchestratorBuilder::default()
    }

    /// Search every module the caller may see
    ///
    /// Queries shorter than the configured minimum return the empty result
    /// without touching caches or collaborators.
    pub async fn search(
        &self,
        query: &str,
        actor_id: &str,
        permissions: &PermissionSet,
    ) -> SearchResponse {
        let start = Instant::now();
        let query = SearchQuery::parse(query);
        if query.char_len() < self.config.min_query_chars() {
            debug!(chars = query.char_len(), "Query below minimum length");
            return SearchResponse::empty();
        }

        let key = ResultKey::new(actor_id, permissions, &query.normalized);
        if let Some(cached) = self.results.get(&key) {
            debug!(actor = actor_id, query = %query.normalized, "Result cache hit");
            return cached;
        }

        let ctx = SearchContext {
            query: &query,
            actor_id,
            permissions,
        };
        let attempts: Vec<(&'static str, BoxFuture<'_, SearchResult<SearchResponse>>)> = self
            .strategies
            .iter()
            .map(|strategy| (strategy.name(), strategy.search(ctx)))
            .collect();

        match first_success(attempts).await {
            Ok((path, mut result)) => {
                result.loaded_at = i64::try_from(self.clock.now_millis()).ok();
                self.results.set(key, result.clone());
                info!(
                    actor = actor_id,
                    query = %query.normalized,
                    path,
                    total = result.total_count(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Search completed"
                );
                result
            }
            Err(e) => {
                warn!(actor = actor_id, error = %e, "No strategy could serve the search");
                SearchResponse::empty()
            }
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Names of the installed strategies in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn recency_cache(&self) -> &RecencyCache {
        &self.recency
    }

    pub fn result_cache(&self) -> &ResultCache {
        &self.results
    }

    /// Drop a caller's cached pool for one module, e.g. after a write
    pub fn invalidate(&self, actor_id: &str, module: Module) {
        self.recency.invalidate(actor_id, module);
    }

    pub fn clear_caches(&self) {
        self.recency.clear();
        self.results.clear();
    }
}

/// Wires collaborators, configuration and clock into a [`SearchOrchestrator`]
#[derive(Default)]
pub struct SearchOrchestratorBuilder {
    store: Option<Arc<dyn DocumentStore>>,
    directory: Option<Arc<dyn StaffDirectory>>,
    delegate: Option<Arc<dyn RemoteDelegate>>,
    config: Option<SearchConfig>,
    clock: Option<Arc<dyn Clock>>,
}

impl SearchOrchestratorBuilder {
    #[must_use]
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn directory(mut self, directory: Arc<dyn StaffDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Install the remote deep search; without it only local search runs
    #[must_use]
    pub fn delegate(mut self, delegate: Arc<dyn RemoteDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    #[must_use]
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the orchestrator
    ///
    /// # Errors
    ///
    /// Returns an error if the document store or staff directory is missing.
    pub fn build(self) -> Result<SearchOrchestrator> {
        let store = self
            .store
            .ok_or_else(|| anyhow!("SearchOrchestrator requires a document store"))?;
        let directory = self
            .directory
            .ok_or_else(|| anyhow!("SearchOrchestrator requires a staff directory"))?;
        let config = self.config.unwrap_or_default();
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let recency = Arc::new(RecencyCache::new(
            config.recency_ttl_ms(),
            config.recency_cache_capacity(),
            Arc::clone(&clock),
        ));
        let results = ResultCache::new(
            config.result_ttl_ms(),
            config.result_cache_capacity(),
            Arc::clone(&clock),
        );

        let mut strategies: Vec<Box<dyn SearchStrategy>> = Vec::with_capacity(2);
        if let Some(delegate) = self.delegate {
            strategies.push(Box::new(RemoteSearchStrategy::new(
                delegate,
                config.remote_timeout(),
                config.results_per_module(),
            )));
        }
        strategies.push(Box::new(LocalSearchStrategy::new(ModuleSearcher::new(
            store,
            directory,
            Arc::clone(&recency),
            config.recency_pool_size(),
            config.results_per_module(),
        ))));

        Ok(SearchOrchestrator {
            config,
            strategies,
            recency,
            results,
            clock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryDocumentStore, InMemoryStaffDirectory};

    #[test]
    fn test_build_requires_store() {
        let result = SearchOrchestrator::builder()
            .directory(Arc::new(InMemoryStaffDirectory::default()))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_strategy_order() {
        let engine = SearchOrchestrator::builder()
            .store(Arc::new(InMemoryDocumentStore::new()))
            .directory(Arc::new(InMemoryStaffDirectory::default()))
            .build()
            .unwrap();
        assert_eq!(engine.strategy_names(), vec!["local"]);
    }
}
