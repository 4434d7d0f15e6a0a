//! Test utilities and collaborators for the omnisearch test suite

use futures::FutureExt;
use futures::future::BoxFuture;
use omnisearch::search::errors::SearchResult;
use omnisearch::{
    DeepSearchRequest, DocumentStore, InMemoryDocumentStore, InMemoryStaffDirectory, ManualClock,
    QuerySpec, RemoteDelegate, SearchConfig, SearchError, SearchOrchestrator, StaffDirectory,
};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const ACTOR: &str = "u1";

/// Document store that counts calls and fails chosen collections
#[allow(dead_code)]
pub struct CountingStore {
    inner: InMemoryDocumentStore,
    failing: HashSet<String>,
    latency: Option<Duration>,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    queried: parking_lot::Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn new(inner: InMemoryDocumentStore) -> Self {
        Self {
            inner,
            failing: HashSet::new(),
            latency: None,
            list_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            queried: parking_lot::Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing(mut self, collection: &str) -> Self {
        self.failing.insert(collection.to_string());
        self
    }

    /// Delay every call by `latency` before answering
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst) + self.get_calls.load(Ordering::SeqCst)
    }

    /// Collections touched so far, in call order
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().clone()
    }
}

impl DocumentStore for CountingStore {
    fn list_recent(&self, query: QuerySpec) -> BoxFuture<'_, SearchResult<Vec<Value>>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().push(query.collection.clone());
        if self.failing.contains(&query.collection) {
            let collection = query.collection.clone();
            return async move { Err(SearchError::backend(collection, "unavailable")) }.boxed();
        }
        let latency = self.latency;
        let answer = self.inner.list_recent(query);
        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            answer.await
        }
        .boxed()
    }

    fn get<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, SearchResult<Option<Value>>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().push(collection.to_string());
        if self.failing.contains(collection) {
            return async move { Err(SearchError::backend(collection, "unavailable")) }.boxed();
        }
        let latency = self.latency;
        let answer = self.inner.get(collection, id);
        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            answer.await
        }
        .boxed()
    }
}

/// Staff directory that counts calls
#[allow(dead_code)]
pub struct CountingDirectory {
    inner: InMemoryStaffDirectory,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingDirectory {
    pub fn new(members: Vec<Value>) -> Self {
        Self {
            inner: InMemoryStaffDirectory::new(members),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StaffDirectory for CountingDirectory {
    fn list_active_staff(&self) -> BoxFuture<'_, SearchResult<Vec<Value>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_active_staff()
    }
}

/// Remote delegate with a scripted behaviour
#[allow(dead_code)]
pub enum DelegateMode {
    Fail,
    Hang,
    Respond(Value),
}

#[allow(dead_code)]
pub struct ScriptedDelegate {
    mode: DelegateMode,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedDelegate {
    pub fn new(mode: DelegateMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteDelegate for ScriptedDelegate {
    fn deep_search(&self, _request: DeepSearchRequest) -> BoxFuture<'_, SearchResult<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            DelegateMode::Fail => {
                async { Err(SearchError::RemoteStatus { status: 503 }) }.boxed()
            }
            DelegateMode::Hang => async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(json!({}))
            }
            .boxed(),
            DelegateMode::Respond(payload) => {
                let payload = payload.clone();
                async move { Ok(payload) }.boxed()
            }
        }
    }
}

/// Documents for actor `u1` across every collection, plus noise for `u2`
#[allow(dead_code)]
pub fn fixture_store() -> InMemoryDocumentStore {
    InMemoryDocumentStore::new()
        .with_documents(
            "properties",
            vec![
                json!({ "id": "p1", "ownerId": ACTOR, "enabled": true, "title": "Casa Juanita", "city": "Sevilla", "createdAt": 10 }),
                json!({ "id": "p2", "ownerId": ACTOR, "enabled": true, "title": "Piso Centro", "city": "Madrid", "createdAt": 20 }),
                json!({ "id": "p3", "ownerId": "u2", "enabled": true, "title": "Casa Juan", "createdAt": 30 }),
            ],
        )
        .with_documents(
            "leads",
            vec![
                json!({ "id": "l1", "ownerId": ACTOR, "name": "Juan Pérez", "email": "juan@example.com", "createdAt": 5 }),
                json!({ "id": "l2", "ownerId": ACTOR, "name": "María López", "createdAt": 6 }),
            ],
        )
        .with_documents(
            "reservations",
            vec![
                json!({ "id": "r1", "ownerId": ACTOR, "guestName": "Juan Pérez", "status": "confirmed", "createdAt": 7 }),
                json!({ "id": "r2", "ownerId": ACTOR, "guestName": "Ana Torres", "status": "pending", "createdAt": 8 }),
            ],
        )
        .with_documents(
            "payments",
            vec![json!({ "id": "pay1", "ownerId": ACTOR, "payerName": "Juan Pérez", "amount": 120.0, "createdAt": 9 })],
        )
        .with_documents(
            "reviews",
            vec![json!({ "id": "rv1", "ownerId": ACTOR, "authorName": "Juan", "comment": "Muy bien", "rating": 5, "createdAt": 4 })],
        )
        .with_documents(
            "users",
            vec![
                json!({ "id": ACTOR, "displayName": "Owner Juan", "email": "owner@example.com", "role": "owner" }),
                json!({ "id": "c1", "role": "client", "name": "Juan Client", "createdAt": 3 }),
                json!({ "id": "c2", "role": "client", "name": "Lucía", "createdAt": 2 }),
            ],
        )
        .with_documents(
            "preferences",
            vec![json!({ "id": ACTOR, "language": "es", "currency": "EUR", "timezone": "Europe/Madrid" })],
        )
}

#[allow(dead_code)]
pub fn fixture_staff() -> Vec<Value> {
    vec![
        json!({ "id": "s1", "displayName": "Juan Limpieza", "role": "cleaner" }),
        json!({ "id": "s2", "displayName": "Pedro", "role": "manager" }),
        json!({ "id": "s3", "displayName": "Juan Inactivo", "active": false }),
    ]
}

/// Orchestrator wired to counting collaborators and a manual clock
#[allow(dead_code)]
pub struct Harness {
    pub engine: SearchOrchestrator,
    pub store: Arc<CountingStore>,
    pub directory: Arc<CountingDirectory>,
    pub clock: Arc<ManualClock>,
}

#[allow(dead_code)]
pub fn harness(store: CountingStore, delegate: Option<Arc<dyn RemoteDelegate>>) -> Harness {
    harness_with_staff(store, fixture_staff(), delegate)
}

#[allow(dead_code)]
pub fn harness_with_staff(
    store: CountingStore,
    staff: Vec<Value>,
    delegate: Option<Arc<dyn RemoteDelegate>>,
) -> Harness {
    let store = Arc::new(store);
    let directory = Arc::new(CountingDirectory::new(staff));
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));

    let mut builder = SearchOrchestrator::builder()
        .store(store.clone())
        .directory(directory.clone())
        .clock(clock.clone())
        .config(
            SearchConfig::builder()
                .remote_timeout_ms(200)
                .build()
                .expect("valid config"),
        );
    if let Some(delegate) = delegate {
        builder = builder.delegate(delegate);
    }

    Harness {
        engine: builder.build().expect("engine builds"),
        store,
        directory,
        clock,
    }
}

/// Install a test subscriber once; honours `RUST_LOG`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
