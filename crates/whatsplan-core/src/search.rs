use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;
use whatsplan_client::{SearchBackend, SearchError};
use whatsplan_config::api::ApiConfig;
use whatsplan_types::{Outcome, Query, Theme, UiUpdate};

use crate::outcome::classify;
use crate::state::{ClientState, Completion, Ticket};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the request lifecycle and the client state it drives
pub struct SearchClient {
    backend: Arc<dyn SearchBackend>,
    state: ClientState,
    timeout: Duration,
    legacy_inference: bool,
}

impl SearchClient {
    pub fn new(backend: Arc<dyn SearchBackend>, theme: Theme) -> Self {
        Self {
            backend,
            state: ClientState::new(theme),
            timeout: DEFAULT_TIMEOUT,
            legacy_inference: false,
        }
    }

    pub fn from_config(backend: Arc<dyn SearchBackend>, config: &ApiConfig, theme: Theme) -> Self {
        Self::new(backend, theme)
            .with_timeout(Duration::from_secs(config.timeout_seconds))
            .with_legacy_inference(config.legacy_validation_inference)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_legacy_inference(mut self, enabled: bool) -> Self {
        self.legacy_inference = enabled;
        self
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
    }

    pub fn ui_update(&self) -> UiUpdate {
        self.state.ui_update()
    }

    /// Move to `Loading` and hand back the request to run.
    /// Returns `None` without touching state for blank input.
    pub fn begin(&mut self, raw: &str) -> Option<PendingSearch> {
        let Ticket { seq, query } = self.state.begin(raw)?;

        Some(PendingSearch {
            seq,
            query,
            request_id: Uuid::new_v4(),
            backend: Arc::clone(&self.backend),
            timeout: self.timeout,
            legacy_inference: self.legacy_inference,
        })
    }

    pub fn finish(&mut self, seq: u64, outcome: &Outcome) -> Completion {
        let completion = self.state.complete(seq, outcome);
        if completion == Completion::Stale {
            tracing::warn!("Discarding stale search result seq={seq}");
        }
        completion
    }

    /// Run one search to completion in place
    pub async fn submit(&mut self, raw: &str) -> Option<UiUpdate> {
        let pending = self.begin(raw)?;
        let (seq, outcome) = pending.run().await;
        self.finish(seq, &outcome);
        Some(self.ui_update())
    }
}

/// An issued search, detached from the client so it can run on its own task
pub struct PendingSearch {
    seq: u64,
    query: Query,
    request_id: Uuid,
    backend: Arc<dyn SearchBackend>,
    timeout: Duration,
    legacy_inference: bool,
}

impl PendingSearch {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Never fails: every error path is folded into the returned outcome
    pub async fn run(self) -> (u64, Outcome) {
        let started = Instant::now();
        tracing::info!(
            request_id = %self.request_id,
            seq = self.seq,
            endpoint = self.backend.endpoint(),
            "Searching for {:?}",
            self.query.as_str()
        );

        let result = match tokio::time::timeout(self.timeout, self.backend.search(&self.query)).await
        {
            Ok(result) => result,
            Err(_) => Err(SearchError::Timeout(self.timeout)),
        };

        if let Err(e) = &result {
            tracing::error!(request_id = %self.request_id, "Search failed: {e}");
        }

        let outcome = classify(result, self.legacy_inference);

        match &outcome {
            Outcome::Events { events, .. } => tracing::info!(
                request_id = %self.request_id,
                "Search completed: {} events in {:?}",
                events.len(),
                started.elapsed()
            ),
            Outcome::InvalidQuery => {
                tracing::info!(request_id = %self.request_id, "Query rejected by validator")
            }
            Outcome::RateLimited => tracing::warn!(request_id = %self.request_id, "Rate limited"),
            Outcome::Failed(_) => {}
        }

        (self.seq, outcome)
    }
}
