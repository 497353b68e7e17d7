use whatsplan_client::SearchError;
use whatsplan_types::{Outcome, QueryStatus, SearchResponse};

pub const FALLBACK_FAILURE: &str = "The search agent failed to return results.";

/// Map one finished request onto a single user-facing outcome.
///
/// Priority: transport failure, rate limit, other HTTP failure, body-level
/// failure, validator rejection, then events (possibly empty).
pub fn classify(result: Result<SearchResponse, SearchError>, legacy_inference: bool) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(SearchError::RateLimited) => return Outcome::RateLimited,
        Err(SearchError::Api { detail, .. }) => {
            return Outcome::Failed(detail.unwrap_or_else(|| FALLBACK_FAILURE.to_string()));
        }
        Err(e) => return Outcome::Failed(e.to_string()),
    };

    if !response.is_success() {
        let detail = response.detail.filter(|d| !d.trim().is_empty());
        return Outcome::Failed(detail.unwrap_or_else(|| FALLBACK_FAILURE.to_string()));
    }

    match response.query_status {
        Some(QueryStatus::Invalid) => return Outcome::InvalidQuery,
        Some(QueryStatus::Valid | QueryStatus::Unknown) => {}
        None => {
            if legacy_inference && response.events.is_empty() && !response.has_search_id() {
                tracing::debug!("Inferring validator rejection from empty legacy response");
                return Outcome::InvalidQuery;
            }
        }
    }

    Outcome::Events {
        events: response.events,
        elapsed_time: response.elapsed_time,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use whatsplan_types::EventRecord;

    use super::*;

    fn success(events: Vec<EventRecord>) -> SearchResponse {
        SearchResponse {
            status: SearchResponse::SUCCESS.to_string(),
            events,
            ..Default::default()
        }
    }

    #[test]
    fn rate_limit_is_distinct_from_failure() {
        assert_eq!(classify(Err(SearchError::RateLimited), false), Outcome::RateLimited);
    }

    #[test]
    fn api_error_uses_detail_then_fallback() {
        let with_detail = SearchError::Api {
            status: 500,
            detail: Some("Graph execution failed".into()),
        };
        assert_eq!(
            classify(Err(with_detail), false),
            Outcome::Failed("Graph execution failed".into())
        );

        let without = SearchError::Api {
            status: 503,
            detail: None,
        };
        assert_eq!(
            classify(Err(without), false),
            Outcome::Failed(FALLBACK_FAILURE.into())
        );
    }

    #[test]
    fn timeout_is_generic_failure() {
        let outcome = classify(Err(SearchError::Timeout(Duration::from_secs(30))), false);
        assert!(matches!(outcome, Outcome::Failed(msg) if msg.contains("30s")));
    }

    #[test]
    fn non_success_body_is_failure() {
        let response = SearchResponse {
            status: "error".into(),
            detail: Some("Upstream search provider down".into()),
            ..Default::default()
        };
        assert_eq!(
            classify(Ok(response), false),
            Outcome::Failed("Upstream search provider down".into())
        );

        let bare = SearchResponse {
            status: "error".into(),
            ..Default::default()
        };
        assert_eq!(classify(Ok(bare), false), Outcome::Failed(FALLBACK_FAILURE.into()));
    }

    #[test]
    fn invalid_query_wins_over_events() {
        let mut response = success(vec![EventRecord::titled("Ignored")]);
        response.query_status = Some(QueryStatus::Invalid);
        assert_eq!(classify(Ok(response), false), Outcome::InvalidQuery);
    }

    #[test]
    fn empty_valid_result_is_not_invalid() {
        let mut response = success(vec![]);
        response.query_status = Some(QueryStatus::Valid);
        response.search_id = Some(json!("abc"));
        assert_eq!(
            classify(Ok(response), true),
            Outcome::Events {
                events: vec![],
                elapsed_time: None
            }
        );
    }

    #[test]
    fn unrecognised_query_status_shows_events() {
        let body = r#"{"status":"success","query_status":"","events":[{"title":"Jazz Night"}]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.query_status, Some(QueryStatus::Unknown));

        let outcome = classify(Ok(response.clone()), true);
        assert_eq!(
            outcome,
            Outcome::Events {
                events: vec![EventRecord::titled("Jazz Night")],
                elapsed_time: None
            }
        );

        let mut empty = response;
        empty.events.clear();
        assert!(matches!(classify(Ok(empty), true), Outcome::Events { .. }));
    }

    #[test]
    fn legacy_inference_only_when_enabled() {
        let response = success(vec![]);
        assert!(matches!(
            classify(Ok(response.clone()), false),
            Outcome::Events { .. }
        ));
        assert_eq!(classify(Ok(response), true), Outcome::InvalidQuery);
    }

    #[test]
    fn legacy_inference_needs_missing_search_id() {
        let mut response = success(vec![]);
        response.search_id = Some(json!(42));
        assert!(matches!(classify(Ok(response), true), Outcome::Events { .. }));
    }
}
