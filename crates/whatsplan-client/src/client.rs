use reqwest::StatusCode;
use serde::Deserialize;
use whatsplan_types::{Query, SearchRequest, SearchResponse};

use crate::{SearchBackend, SearchError};

#[derive(Clone)]
pub struct HttpSearchClient {
    search_url: String,
    client: reqwest::Client,
}

impl HttpSearchClient {
    pub fn new(search_url: String) -> Self {
        Self::with_client(search_url, reqwest::Client::new())
    }

    pub fn with_client(search_url: String, client: reqwest::Client) -> Self {
        Self { search_url, client }
    }
}

#[async_trait::async_trait]
impl SearchBackend for HttpSearchClient {
    async fn search(&self, query: &Query) -> Result<SearchResponse, SearchError> {
        let request = SearchRequest {
            query: query.as_str(),
        };

        tracing::debug!("POST {} query={:?}", self.search_url, request.query);

        let response = self
            .client
            .post(&self.search_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }

        if !status.is_success() {
            // Error bodies are best-effort, a missing detail is not an error
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }

    fn endpoint(&self) -> &str {
        &self.search_url
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Pull a `detail` string out of an error body like `{"detail": "..."}`
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::error_detail;

    #[test]
    fn detail_string_is_extracted() {
        assert_eq!(
            error_detail(r#"{"detail":"Graph failed"}"#).as_deref(),
            Some("Graph failed")
        );
    }

    #[test]
    fn structured_or_missing_detail_is_ignored() {
        assert_eq!(error_detail(r#"{"detail":[{"loc":["body"]}]}"#), None);
        assert_eq!(error_detail(r#"{"detail":"  "}"#), None);
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(""), None);
    }
}
