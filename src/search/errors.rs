//! Error types for search operations
//!
//! Every failure the engine can observe is classified here. Almost all of them
//! are recovered internally (a module resolves empty, the remote path falls
//! back to local search); only contract violations surface to callers.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Error types for search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// A document store or directory query failed
    #[error("Backend query failed for {collection}: {message}")]
    Backend { collection: String, message: String },

    /// Remote delegate answered with a non-success status
    #[error("Remote search returned status {status}")]
    RemoteStatus { status: u16 },

    /// Remote delegate answered with a payload that is not a search result
    #[error("Malformed remote search response: {0}")]
    MalformedResponse(String),

    /// Remote delegate did not answer in time
    #[error("Remote search timed out after {0:?}")]
    Timeout(Duration),

    /// No strategy was able to serve the request
    #[error("Search strategy not configured: {0}")]
    NotConfigured(String),

    /// Permission map names a module the engine does not know
    #[error("Unknown search module '{0}'")]
    UnknownModule(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for SearchError {
    fn from(error: anyhow::Error) -> Self {
        SearchError::Other(error.to_string())
    }
}

impl SearchError {
    /// Shorthand for a backend failure on `collection`
    pub fn backend(collection: impl Into<String>, message: impl ToString) -> Self {
        SearchError::Backend {
            collection: collection.into(),
            message: message.to_string(),
        }
    }

    /// Check if error is transient (a later identical call may succeed)
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Backend { .. } | SearchError::Http(_) | SearchError::Timeout(_) => true,
            SearchError::RemoteStatus { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Check if error is a caller contract violation rather than a runtime failure
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, SearchError::UnknownModule(_))
    }
}
