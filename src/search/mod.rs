//! Federated search across the caller's modules
//!
//! Queries are normalized, narrowed by module hints, scored with a
//! deterministic heuristic and merged into one fixed-shape result. See
//! [`SearchOrchestrator`] for the entry point.

pub mod errors;
pub mod hints;
pub mod modules;
pub mod normalize;
pub mod orchestrator;
pub mod records;
pub mod runtime_helpers;
pub mod scoring;
pub mod strategy;
pub mod types;

pub use errors::SearchError;
pub use hints::{ModuleHintPlan, detect_plan};
pub use modules::ModuleSearcher;
pub use normalize::{SearchQuery, normalize, tokenize};
pub use orchestrator::{SearchOrchestrator, SearchOrchestratorBuilder};
pub use records::{
    Client, Lead, ModuleRecord, Payment, Preferences, Profile, Property, Record, Reservation,
    Review, SearchFields, StaffMember,
};
pub use runtime_helpers::{first_success, timeout_task};
pub use scoring::{ScoredCandidate, rank_documents, score};
pub use strategy::{LocalSearchStrategy, RemoteSearchStrategy, SearchContext, SearchStrategy};
pub use types::{Module, PermissionSet, SearchResponse};
