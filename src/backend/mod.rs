//! External collaborators the engine reads from
//!
//! The engine never talks to a database or a search service directly. It goes
//! through these three capabilities, which the host application implements
//! over its real backend:
//!
//! - [`DocumentStore`]: recent documents of a collection, or one document by id
//! - [`StaffDirectory`]: active staff members
//! - [`RemoteDelegate`]: a server-side "deep search" function
//!
//! All three are read-only from the engine's point of view.

pub mod http;
pub mod memory;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::search::errors::SearchResult;
use crate::utils::CREATED_AT_FIELD;

pub use http::HttpRemoteDelegate;
pub use memory::{InMemoryDocumentStore, InMemoryStaffDirectory};

/// Equality predicate on a top-level document field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Value) -> bool {
        document.get(&self.field) == Some(&self.value)
    }
}

/// "Documents in `collection` matching every filter, newest first, at most `limit`"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub collection: String,
    pub filters: Vec<FieldFilter>,
    /// Field ordered by, descending
    pub order_by: String,
    pub limit: usize,
}

impl QuerySpec {
    pub fn recent(collection: impl Into<String>, limit: usize) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: CREATED_AT_FIELD.to_string(),
            limit,
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: FieldFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

/// Read access to the document database
pub trait DocumentStore: Send + Sync {
    fn list_recent(&self, query: QuerySpec) -> BoxFuture<'_, SearchResult<Vec<Value>>>;

    fn get<'a>(&'a self, collection: &'a str, id: &'a str)
    -> BoxFuture<'a, SearchResult<Option<Value>>>;
}

/// Staff listing, served independently of the document store
pub trait StaffDirectory: Send + Sync {
    fn list_active_staff(&self) -> BoxFuture<'_, SearchResult<Vec<Value>>>;
}

/// Request sent to the remote deep-search function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepSearchRequest {
    pub query: String,
    pub limit_per_module: usize,
}

/// Server-side search; any error makes the engine fall back to local search
pub trait RemoteDelegate: Send + Sync {
    fn deep_search(&self, request: DeepSearchRequest) -> BoxFuture<'_, SearchResult<Value>>;
}
