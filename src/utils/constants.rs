//! Shared configuration constants for omnisearch
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Minimum normalized query length: 2 characters
///
/// Queries shorter than this never reach a cache or a collaborator. Typing a
/// single keystroke into the search box must not trigger a fan-out.
pub const MIN_QUERY_CHARS: usize = 2;

/// Maximum ranked results returned per module: 10
pub const RESULTS_PER_MODULE: usize = 10;

/// Recency pool size: 120 documents per module
///
/// Number of most-recently-created documents pulled from the backend on a
/// recency cache miss. Bounds per-call scoring work regardless of how large
/// the underlying collection grows.
pub const RECENCY_POOL_SIZE: usize = 120;

/// Recency cache time-to-live: 30 seconds
pub const RECENCY_TTL_MS: u64 = 30_000;

/// Result cache time-to-live: 20 seconds
pub const RESULT_TTL_MS: u64 = 20_000;

/// Maximum (actor, module) pools held by the recency cache before LRU eviction
pub const RECENCY_CACHE_CAPACITY: usize = 512;

/// Maximum merged results held by the result cache before LRU eviction
pub const RESULT_CACHE_CAPACITY: usize = 256;

/// Default timeout for the remote deep-search delegate: 5 seconds
///
/// A delegate that does not answer within this window is treated exactly like
/// a failed one and the local fallback runs instead.
pub const REMOTE_TIMEOUT_MS: u64 = 5_000;

/// Field every backend collection is ordered by (descending) for recency pools
pub const CREATED_AT_FIELD: &str = "createdAt";
