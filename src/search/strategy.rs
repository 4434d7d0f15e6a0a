//! Search strategies tried in priority order by the orchestrator
//!
//! The remote strategy hands the whole query to a server-side deep search.
//! The local strategy fans out over the per-module search functions. Both
//! produce the same fixed-shape [`SearchResponse`].

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::errors::{SearchError, SearchResult};
use super::hints::detect_plan;
use super::modules::ModuleSearcher;
use super::normalize::SearchQuery;
use super::runtime_helpers::timeout_task;
use super::types::{Module, PermissionSet, SearchResponse};
use crate::backend::{DeepSearchRequest, RemoteDelegate};

/// Everything a strategy needs to serve one request
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub query: &'a SearchQuery,
    pub actor_id: &'a str,
    pub permissions: &'a PermissionSet,
}

/// One way of answering a search
///
/// An `Err` means "this strategy could not serve the request" and makes the
/// orchestrator move on to the next one.
pub trait SearchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn search<'a>(
        &'a self,
        ctx: SearchContext<'a>,
    ) -> BoxFuture<'a, SearchResult<SearchResponse>>;
}

/// Server-side deep search through a [`RemoteDelegate`]
pub struct RemoteSearchStrategy {
    delegate: Arc<dyn RemoteDelegate>,
    timeout: Duration,
    limit_per_module: usize,
}

impl RemoteSearchStrategy {
    pub fn new(delegate: Arc<dyn RemoteDelegate>, timeout: Duration, limit_per_module: usize) -> Self {
        Self {
            delegate,
            timeout,
            limit_per_module,
        }
    }

    async fn run(&self, ctx: SearchContext<'_>) -> SearchResult<SearchResponse> {
        let request = DeepSearchRequest {
            query: ctx.query.normalized.clone(),
            limit_per_module: self.limit_per_module,
        };
        let payload = timeout_task(self.timeout, self.delegate.deep_search(request)).await?;
        if !payload.is_object() {
            return Err(SearchError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        }

        // Missing modules default to empty through the result's serde defaults
        let mut result: SearchResponse = serde_json::from_value(payload)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;
        result.truncate(self.limit_per_module);
        result.retain_permitted(ctx.permissions);
        result.loaded_at = None;
        Ok(result)
    }
}

impl SearchStrategy for RemoteSearchStrategy {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn search<'a>(
        &'a self,
        ctx: SearchContext<'a>,
    ) -> BoxFuture<'a, SearchResult<SearchResponse>> {
        Box::pin(self.run(ctx))
    }
}

/// Resolve `search` only when `enabled`, otherwise the module's empty value
async fn gated<T: Default>(enabled: bool, search: impl Future<Output = T>) -> T {
    if enabled { search.await } else { T::default() }
}

/// Concurrent per-module search over the caller's recent documents
pub struct LocalSearchStrategy {
    searcher: ModuleSearcher,
}

impl LocalSearchStrategy {
    pub fn new(searcher: ModuleSearcher) -> Self {
        Self { searcher }
    }

    async fn run(&self, ctx: SearchContext<'_>) -> SearchResult<SearchResponse> {
        let plan = detect_plan(&ctx.query.normalized);
        let query = plan.scoring_query(&ctx.query.normalized);
        let actor = ctx.actor_id;
        let on = |module: Module| plan.should_search(module, ctx.permissions);
        let s = &self.searcher;

        let (properties, leads, reservations, payments, reviews, team, clients, profile, preferences) = tokio::join!(
            gated(on(Module::Properties), s.properties(actor, query)),
            gated(on(Module::Leads), s.leads(actor, query)),
            gated(on(Module::Reservations), s.reservations(actor, query)),
            gated(on(Module::Payments), s.payments(actor, query)),
            gated(on(Module::Reviews), s.reviews(actor, query)),
            gated(on(Module::Team), s.team(actor, query)),
            gated(on(Module::Clients), s.clients(actor, query)),
            gated(on(Module::Profile), s.profile(actor, query)),
            gated(on(Module::Preferences), s.preferences(actor, query)),
        );

        Ok(SearchResponse {
            properties,
            leads,
            reservations,
            payments,
            reviews,
            team,
            clients,
            profile,
            preferences,
            activity_logs: Vec::new(),
            loaded_at: None,
        })
    }
}

impl SearchStrategy for LocalSearchStrategy {
    fn name(&self) -> &'static str {
        "local"
    }

    fn search<'a>(
        &'a self,
        ctx: SearchContext<'a>,
    ) -> BoxFuture<'a, SearchResult<SearchResponse>> {
        Box::pin(self.run(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use serde_json::{Value, json};

    struct StaticDelegate(Value);

    impl RemoteDelegate for StaticDelegate {
        fn deep_search(&self, _request: DeepSearchRequest) -> BoxFuture<'_, SearchResult<Value>> {
            let payload = self.0.clone();
            async move { Ok(payload) }.boxed()
        }
    }

    fn ctx<'a>(query: &'a SearchQuery, permissions: &'a PermissionSet) -> SearchContext<'a> {
        SearchContext {
            query,
            actor_id: "u1",
            permissions,
        }
    }

    #[tokio::test]
    async fn test_remote_payload_is_truncated_and_masked() {
        let leads: Vec<Value> = (0..15).map(|i| json!({ "id": format!("l{i}") })).collect();
        let payload = json!({
            "leads": leads,
            "clients": [{ "id": "c1" }],
            "loadedAt": 99
        });
        let strategy = RemoteSearchStrategy::new(
            Arc::new(StaticDelegate(payload)),
            Duration::from_secs(1),
            10,
        );
        let query = SearchQuery::parse("juan");
        let perms = PermissionSet::all().deny(Module::Clients);

        let result = strategy.search(ctx(&query, &perms)).await.unwrap();
        assert_eq!(result.leads.len(), 10);
        assert!(result.clients.is_empty());
        assert!(result.loaded_at.is_none());
    }

    #[tokio::test]
    async fn test_remote_non_object_is_malformed() {
        let strategy = RemoteSearchStrategy::new(
            Arc::new(StaticDelegate(json!([1, 2, 3]))),
            Duration::from_secs(1),
            10,
        );
        let query = SearchQuery::parse("juan");
        let perms = PermissionSet::all();
        assert!(matches!(
            strategy.search(ctx(&query, &perms)).await,
            Err(SearchError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_remote_wrong_field_type_is_malformed() {
        let strategy = RemoteSearchStrategy::new(
            Arc::new(StaticDelegate(json!({ "leads": "nope" }))),
            Duration::from_secs(1),
            10,
        );
        let query = SearchQuery::parse("juan");
        let perms = PermissionSet::all();
        assert!(strategy.search(ctx(&query, &perms)).await.is_err());
    }
}
