//! Result cache: complete merged responses keyed by actor, permissions and query

use std::sync::Arc;

use super::clock::Clock;
use super::ttl::{CacheStats, TtlCache};
use crate::search::types::{PermissionSet, SearchResponse};

/// Identity of one search request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub actor_id: String,
    pub permission_signature: String,
    pub normalized_query: String,
}

impl ResultKey {
    pub fn new(actor_id: &str, permissions: &PermissionSet, normalized_query: &str) -> Self {
        Self {
            actor_id: actor_id.to_string(),
            permission_signature: permissions.signature(),
            normalized_query: normalized_query.to_string(),
        }
    }
}

pub struct ResultCache {
    inner: TtlCache<ResultKey, Arc<SearchResponse>>,
}

impl ResultCache {
    pub fn new(ttl_ms: u64, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: TtlCache::new(ttl_ms, capacity, clock),
        }
    }

    /// Cached result, returned exactly as stored
    pub fn get(&self, key: &ResultKey) -> Option<SearchResponse> {
        self.inner.get(key).map(|result| (*result).clone())
    }

    pub fn set(&self, key: ResultKey, result: SearchResponse) {
        self.inner.insert(key, Arc::new(result));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use crate::search::types::Module;

    #[test]
    fn test_key_distinguishes_permissions() {
        let all = PermissionSet::all();
        let no_leads = PermissionSet::all().deny(Module::Leads);
        assert_ne!(
            ResultKey::new("u1", &all, "juan"),
            ResultKey::new("u1", &no_leads, "juan")
        );
        assert_eq!(
            ResultKey::new("u1", &all, "juan"),
            ResultKey::new("u1", &PermissionSet::all(), "juan")
        );
    }

    #[test]
    fn test_result_expires_after_ttl() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = ResultCache::new(20_000, 8, clock.clone());
        let key = ResultKey::new("u1", &PermissionSet::all(), "juan");

        let mut result = SearchResponse::empty();
        result.loaded_at = Some(7);
        cache.set(key.clone(), result.clone());

        clock.advance_ms(20_000);
        assert_eq!(cache.get(&key), Some(result));
        clock.advance_ms(1);
        assert_eq!(cache.get(&key), None);
    }
}
