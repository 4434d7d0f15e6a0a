//! Process-scoped caches for the search engine
//!
//! Both caches are plain constructed objects: build one per engine (or per
//! test) and share it through `Arc`. Expiry is driven by an injectable
//! [`Clock`].

pub mod clock;
pub mod recency;
pub mod results;
pub mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use recency::{RecencyCache, RecencyPool};
pub use results::{ResultCache, ResultKey};
pub use ttl::{CacheEntry, CacheStats, TtlCache};
