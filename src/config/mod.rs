//! Configuration module for the search engine
//!
//! This module provides the `SearchConfig` struct, its builder with validation
//! and sensible defaults, and `RemoteConfig` for the HTTP deep-search delegate.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::SearchConfigBuilder;
pub use types::{RemoteConfig, SearchConfig};
