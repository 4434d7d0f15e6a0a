//! Runtime helper functions for async timeout and fallback patterns

use futures::future::BoxFuture;
use std::future::Future;
use std::time::Duration;

use super::errors::{SearchError, SearchResult};

/// Bound an operation by `limit`, reporting expiry as [`SearchError::Timeout`]
#[inline(always)]
pub async fn timeout_task<Fut, T>(limit: Duration, operation: Fut) -> SearchResult<T>
where
    Fut: Future<Output = SearchResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::Timeout(limit)),
    }
}

/// Run named attempts in order and return the first success
///
/// Attempts are lazy futures: a later one is only polled after every earlier
/// one failed. On success the name of the attempt that served the request is
/// returned alongside the value. When every attempt fails the first error is
/// returned, as it comes from the preferred path.
pub async fn first_success<'a, T>(
    attempts: Vec<(&'static str, BoxFuture<'a, SearchResult<T>>)>,
) -> SearchResult<(&'static str, T)>
where
    T: Send + 'a,
{
    let mut first_error: Option<SearchError> = None;

    for (index, (name, attempt)) in attempts.into_iter().enumerate() {
        match attempt.await {
            Ok(value) => {
                if index > 0 {
                    tracing::info!(strategy = name, "Fallback operation succeeded");
                }
                return Ok((name, value));
            }
            Err(e) => {
                tracing::warn!(
                    strategy = name,
                    error = %e,
                    transient = e.is_transient(),
                    "Search strategy failed, attempting fallback"
                );
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => {
            tracing::error!(error = %e, "All search strategies failed");
            Err(e)
        }
        None => Err(SearchError::NotConfigured(
            "no search strategy installed".to_string(),
        )),
    }
}
