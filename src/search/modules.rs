//! Per-module search functions
//!
//! List modules pull their candidate pool through the recency cache and rank
//! it; `profile` and `preferences` look up the caller's own record. Every
//! function here swallows its own backend errors: a failing module resolves
//! empty and never takes the rest of the search down with it.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

use super::errors::SearchResult;
use super::records::{
    Client, Lead, ModuleRecord, Payment, Preferences, Profile, Property, Record, Reservation,
    Review, SearchFields, StaffMember, decode_records,
};
use super::scoring::{rank_documents, score};
use super::types::Module;
use crate::backend::{DocumentStore, FieldFilter, QuerySpec, StaffDirectory};
use crate::cache::RecencyCache;

const OWNER_FIELD: &str = "ownerId";

/// Backend collection and scoping predicate for a list module
///
/// `team` is served by the staff directory and has no collection.
pub fn recency_query(module: Module, actor_id: &str, limit: usize) -> Option<QuerySpec> {
    let owned = |collection: &str| {
        QuerySpec::recent(collection, limit).filter(FieldFilter::eq(OWNER_FIELD, actor_id))
    };
    match module {
        Module::Properties => Some(owned("properties").filter(FieldFilter::eq("enabled", true))),
        Module::Leads => Some(owned("leads")),
        Module::Reservations => Some(owned("reservations")),
        Module::Payments => Some(owned("payments")),
        Module::Reviews => Some(owned("reviews")),
        Module::Clients => {
            Some(QuerySpec::recent("users", limit).filter(FieldFilter::eq("role", "client")))
        }
        Module::Team | Module::Profile | Module::Preferences => None,
    }
}

/// Searches one module at a time against the configured collaborators
#[derive(Clone)]
pub struct ModuleSearcher {
    store: Arc<dyn DocumentStore>,
    directory: Arc<dyn StaffDirectory>,
    recency: Arc<RecencyCache>,
    pool_size: usize,
    limit: usize,
}

impl ModuleSearcher {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        directory: Arc<dyn StaffDirectory>,
        recency: Arc<RecencyCache>,
        pool_size: usize,
        limit: usize,
    ) -> Self {
        Self {
            store,
            directory,
            recency,
            pool_size,
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn properties(&self, actor_id: &str, query: &str) -> Vec<Property> {
        self.search_list(actor_id, query).await
    }

    pub async fn leads(&self, actor_id: &str, query: &str) -> Vec<Lead> {
        self.search_list(actor_id, query).await
    }

    pub async fn reservations(&self, actor_id: &str, query: &str) -> Vec<Reservation> {
        self.search_list(actor_id, query).await
    }

    pub async fn payments(&self, actor_id: &str, query: &str) -> Vec<Payment> {
        self.search_list(actor_id, query).await
    }

    pub async fn reviews(&self, actor_id: &str, query: &str) -> Vec<Review> {
        self.search_list(actor_id, query).await
    }

    pub async fn team(&self, actor_id: &str, query: &str) -> Vec<StaffMember> {
        self.search_list(actor_id, query).await
    }

    pub async fn clients(&self, actor_id: &str, query: &str) -> Vec<Client> {
        self.search_list(actor_id, query).await
    }

    /// The caller's profile, if it matches the query
    pub async fn profile(&self, actor_id: &str, query: &str) -> Option<Profile> {
        self.search_own::<Profile>(Module::Profile, "users", actor_id, query)
            .await
    }

    /// The caller's preferences, if they match the query
    pub async fn preferences(&self, actor_id: &str, query: &str) -> Option<Preferences> {
        self.search_own::<Preferences>(Module::Preferences, "preferences", actor_id, query)
            .await
    }

    /// Recency pool for `T`'s module, ranked against `query`
    async fn search_list<T: ModuleRecord>(&self, actor_id: &str, query: &str) -> Vec<T> {
        let pool = match self
            .recency
            .get_or_fetch(actor_id, T::MODULE, || self.fetch_pool::<T>(actor_id))
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!(module = %T::MODULE, actor = actor_id, error = %e, "Module fetch failed, resolving empty");
                return Vec::new();
            }
        };

        rank_documents(
            pool.iter().filter_map(T::from_record),
            query,
            T::search_fields,
            self.limit,
        )
        .into_iter()
        .cloned()
        .collect()
    }

    async fn fetch_pool<T: ModuleRecord>(&self, actor_id: &str) -> SearchResult<Vec<Record>> {
        let snapshots = match recency_query(T::MODULE, actor_id, self.pool_size) {
            Some(spec) => self.store.list_recent(spec).await?,
            None => {
                let mut staff = self.directory.list_active_staff().await?;
                staff.truncate(self.pool_size);
                staff
            }
        };
        Ok(decode_records::<T>(snapshots))
    }

    async fn search_own<T>(
        &self,
        module: Module,
        collection: &str,
        actor_id: &str,
        query: &str,
    ) -> Option<T>
    where
        T: DeserializeOwned + SearchFields,
    {
        let snapshot = match self.store.get(collection, actor_id).await {
            Ok(snapshot) => snapshot?,
            Err(e) => {
                warn!(module = %module, actor = actor_id, error = %e, "Lookup failed, resolving empty");
                return None;
            }
        };

        let record: T = match serde_json::from_value(snapshot) {
            Ok(record) => record,
            Err(e) => {
                warn!(module = %module, actor = actor_id, error = %e, "Undecodable record");
                return None;
            }
        };

        (score(query, &record.search_fields()) > 0).then_some(record)
    }
}
