//! Time-bounded cache with LRU capacity bound
//!
//! Entries carry the time they were stored. A lookup that finds an entry older
//! than the TTL treats it as absent and removes it on the spot: there is no
//! background sweeper. Capacity is bounded with least-recently-used eviction
//! so many distinct keys cannot grow the map without limit.

use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::clock::Clock;

/// A cached value and the epoch millisecond it was stored at
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at_ms: u64,
}

impl<V> CacheEntry<V> {
    /// Fresh while `now - stored_at_ms <= ttl_ms`
    #[inline]
    pub fn is_fresh(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at_ms) <= ttl_ms
    }
}

/// Hit/miss counters (for monitoring)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
}

/// Thread-safe TTL cache
///
/// Critical sections are short and synchronous; the lock is never held across
/// an `.await`.
pub struct TtlCache<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, CacheEntry<V>>>,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Debug,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries (0 is treated as 1)
    pub fn new(ttl_ms: u64, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl_ms,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expired: AtomicU64::new(0),
        }
    }

    /// Fresh value for `key`, evicting it if it has expired
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now_millis();
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl_ms) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
            self.expired.fetch_add(1, Ordering::Relaxed);
            debug!("Evicted expired cache entry {key:?} (ttl: {}ms)", self.ttl_ms);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store `value` stamped with the current time (last write wins)
    pub fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            stored_at_ms: self.clock.now_millis(),
        };
        let mut entries = self.entries.lock();
        let replacing = entries.contains(&key);
        match entries.push(key, entry) {
            Some((evicted, _)) if !replacing => {
                debug!("LRU eviction: {evicted:?} (cache size: {})", entries.len());
            }
            _ => {}
        }
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.lock().pop(key);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, expired ones included until looked up
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
        }
    }
}
