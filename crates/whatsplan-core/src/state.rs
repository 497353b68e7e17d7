use whatsplan_types::{Notice, NoticeKind, Outcome, Query, Theme, UiUpdate, View};

use crate::render::{failure_notice, notice, render_outcome};

/// Lifecycle of the result area
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading { seq: u64, query: Query },
    Rendered(View),
    Error(Notice),
}

/// A search that has entered `Loading` and is waiting for its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub query: Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer search was issued, or nothing was loading
    Stale,
}

/// All mutable client-side UI state
#[derive(Debug, Clone)]
pub struct ClientState {
    pub theme: Theme,
    state: SearchState,
    latest_seq: u64,
}

impl ClientState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            state: SearchState::Idle,
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The submit control is disabled for as long as a search is loading
    pub fn trigger_enabled(&self) -> bool {
        !matches!(self.state, SearchState::Loading { .. })
    }

    /// Enter `Loading` for a non-blank query. Blank input leaves state untouched.
    ///
    /// Re-entry while loading is allowed and supersedes the in-flight search.
    pub fn begin(&mut self, raw: &str) -> Option<Ticket> {
        let query = Query::parse(raw)?;

        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.state = SearchState::Loading {
            seq,
            query: query.clone(),
        };

        Some(Ticket { seq, query })
    }

    pub fn complete(&mut self, seq: u64, outcome: &Outcome) -> Completion {
        match &self.state {
            SearchState::Loading { seq: current, .. } if *current == seq => {}
            _ => return Completion::Stale,
        }

        self.state = match outcome {
            Outcome::Events { .. } | Outcome::InvalidQuery => {
                SearchState::Rendered(render_outcome(outcome))
            }
            Outcome::RateLimited => SearchState::Error(notice(NoticeKind::RateLimited)),
            Outcome::Failed(detail) => SearchState::Error(failure_notice(detail)),
        };

        Completion::Applied
    }

    pub fn view(&self) -> View {
        match &self.state {
            SearchState::Idle => View::Blank,
            SearchState::Loading { .. } => View::Searching,
            SearchState::Rendered(view) => view.clone(),
            SearchState::Error(notice) => View::Notice(notice.clone()),
        }
    }

    pub fn ui_update(&self) -> UiUpdate {
        UiUpdate {
            view: self.view(),
            trigger_enabled: self.trigger_enabled(),
            theme: self.theme,
        }
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
