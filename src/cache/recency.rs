//! Recency cache: the most recent documents per (actor, module)
//!
//! Most searches re-scan the same small recent working set, so each module's
//! pool is fetched once and reused for every keystroke inside the TTL window.

use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use super::clock::Clock;
use super::ttl::{CacheStats, TtlCache};
use crate::search::errors::SearchResult;
use crate::search::records::Record;
use crate::search::types::Module;

/// A module's candidate pool, newest first
pub type RecencyPool = Arc<Vec<Record>>;

pub struct RecencyCache {
    inner: TtlCache<(String, Module), RecencyPool>,
}

impl RecencyCache {
    pub fn new(ttl_ms: u64, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: TtlCache::new(ttl_ms, capacity, clock),
        }
    }

    pub fn get(&self, actor_id: &str, module: Module) -> Option<RecencyPool> {
        self.inner.get(&(actor_id.to_string(), module))
    }

    pub fn set(&self, actor_id: &str, module: Module, docs: Vec<Record>) -> RecencyPool {
        let pool = Arc::new(docs);
        self.inner
            .insert((actor_id.to_string(), module), Arc::clone(&pool));
        pool
    }

    /// Cached pool, or run `fetch` and cache what it returns
    ///
    /// No lock is held while `fetch` runs. Two concurrent misses for the same
    /// key both fetch and the later write wins. Fetch errors are returned to
    /// the caller and nothing is cached.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        actor_id: &str,
        module: Module,
        fetch: F,
    ) -> SearchResult<RecencyPool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SearchResult<Vec<Record>>>,
    {
        if let Some(pool) = self.get(actor_id, module) {
            debug!(actor = actor_id, module = %module, size = pool.len(), "Recency cache hit");
            return Ok(pool);
        }

        let docs = fetch().await?;
        debug!(actor = actor_id, module = %module, size = docs.len(), "Recency pool fetched");
        Ok(self.set(actor_id, module, docs))
    }

    pub fn invalidate(&self, actor_id: &str, module: Module) {
        self.inner.invalidate(&(actor_id.to_string(), module));
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }
}
