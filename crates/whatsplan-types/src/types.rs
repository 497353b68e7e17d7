use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::view::{Theme, UiUpdate};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw text typed by the user, not yet validated
    SubmitQuery(String),
    SelectChip(usize),
    ListChips,
    ToggleTheme,
    SearchCompleted {
        seq: u64,
        outcome: Outcome,
    },
    Render(UiUpdate),
    ThemeChanged(Theme),
    ShowChips(Vec<String>),
    Quit,
}

/// A trimmed, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Returns `None` for empty or whitespace-only input
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Valid,
    Invalid,
    /// Any other value, including `""`. Only `invalid` rejects a query.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub query_status: Option<QueryStatus>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub elapsed_time: Option<f64>,
    /// Opaque identifier, kept as raw JSON
    #[serde(default)]
    pub search_id: Option<serde_json::Value>,
}

impl SearchResponse {
    pub const SUCCESS: &'static str = "success";

    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS
    }

    /// `null` counts as absent
    pub fn has_search_id(&self) -> bool {
        matches!(&self.search_id, Some(id) if !id.is_null())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl EventRecord {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Result of one search attempt, after HTTP and body checks
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Events {
        events: Vec<EventRecord>,
        elapsed_time: Option<f64>,
    },
    InvalidQuery,
    RateLimited,
    Failed(String),
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}
