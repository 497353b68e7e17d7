mod client;

use std::time::Duration;

use whatsplan_types::{Query, SearchResponse};

pub use client::HttpSearchClient;

/// Backend that answers event search queries
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search. The response body is returned as-is for 2xx replies;
    /// body-level status checks are left to the caller.
    async fn search(&self, query: &Query) -> Result<SearchResponse, SearchError>;

    /// Human readable endpoint, used in logs
    fn endpoint(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No response within {0:?}")]
    Timeout(Duration),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Api { status: u16, detail: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl SearchError {
    /// Backend-provided explanation, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            SearchError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
