pub mod backend;
pub mod cache;
pub mod config;
pub mod search;
pub mod utils;

pub use backend::{
    DeepSearchRequest, DocumentStore, FieldFilter, HttpRemoteDelegate, InMemoryDocumentStore,
    InMemoryStaffDirectory, QuerySpec, RemoteDelegate, StaffDirectory, memory::Snapshot,
};
pub use cache::{Clock, ManualClock, RecencyCache, ResultCache, SystemClock};
pub use config::{RemoteConfig, SearchConfig, SearchConfigBuilder};
pub use search::{
    Module, PermissionSet, SearchError, SearchOrchestrator, SearchOrchestratorBuilder,
    SearchQuery, SearchResponse, normalize, rank_documents, score,
};

