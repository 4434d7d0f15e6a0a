//! In-memory collaborators over JSON snapshots
//!
//! Useful for demos, fixtures and tests: they honour the same filtering,
//! ordering and limit contract a real document database would.

use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::{DocumentStore, QuerySpec, StaffDirectory};
use crate::search::errors::SearchResult;

/// Compare two ordering-field values; present values sort above absent ones
fn compare_order_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        (Some(Value::Null) | None, Some(_)) => Ordering::Less,
        (Some(_), Some(Value::Null) | None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Collections of raw JSON documents keyed by collection name
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_collections(collections: HashMap<String, Vec<Value>>) -> Self {
        Self {
            collections: RwLock::new(collections),
        }
    }

    pub fn insert(&self, collection: &str, document: Value) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    #[must_use]
    pub fn with_documents(self, collection: &str, documents: impl IntoIterator<Item = Value>) -> Self {
        for document in documents {
            self.insert(collection, document);
        }
        self
    }

    pub fn collection_len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn query_sync(&self, query: &QuerySpec) -> Vec<Value> {
        let collections = self.collections.read();
        let Some(documents) = collections.get(&query.collection) else {
            return Vec::new();
        };

        let mut matching: Vec<&Value> = documents
            .iter()
            .filter(|doc| query.filters.iter().all(|f| f.matches(doc)))
            .collect();
        matching.sort_by(|a, b| {
            compare_order_values(b.get(&query.order_by), a.get(&query.order_by))
        });
        matching.into_iter().take(query.limit).cloned().collect()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list_recent(&self, query: QuerySpec) -> BoxFuture<'_, SearchResult<Vec<Value>>> {
        let documents = self.query_sync(&query);
        Box::pin(async move { Ok(documents) })
    }

    fn get<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, SearchResult<Option<Value>>> {
        let document = self.collections.read().get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| doc.get("id").and_then(Value::as_str) == Some(id))
                .cloned()
        });
        Box::pin(async move { Ok(document) })
    }
}

/// Fixed staff roster; members with `"active": false` are hidden
#[derive(Debug, Default)]
pub struct InMemoryStaffDirectory {
    members: Vec<Value>,
}

impl InMemoryStaffDirectory {
    pub fn new(members: Vec<Value>) -> Self {
        Self { members }
    }
}

impl StaffDirectory for InMemoryStaffDirectory {
    fn list_active_staff(&self) -> BoxFuture<'_, SearchResult<Vec<Value>>> {
        let active: Vec<Value> = self
            .members
            .iter()
            .filter(|m| m.get("active").and_then(Value::as_bool) != Some(false))
            .cloned()
            .collect();
        Box::pin(async move { Ok(active) })
    }
}

/// On-disk fixture format: collections plus the staff roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub collections: HashMap<String, Vec<Value>>,
    #[serde(default)]
    pub staff: Vec<Value>,
}

impl Snapshot {
    pub fn into_collaborators(self) -> (InMemoryDocumentStore, InMemoryStaffDirectory) {
        (
            InMemoryDocumentStore::from_collections(self.collections),
            InMemoryStaffDirectory::new(self.staff),
        )
    }
}
