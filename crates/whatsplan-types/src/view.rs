use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Everything the UI needs to redraw after a lifecycle change
#[derive(Debug, Clone, PartialEq)]
pub struct UiUpdate {
    pub view: View,
    pub trigger_enabled: bool,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Nothing searched yet
    Blank,
    Searching,
    Cards { cards: Vec<Card>, meta: ResultMeta },
    Notice(Notice),
}

impl View {
    pub fn card_count(&self) -> usize {
        match self {
            View::Cards { cards, .. } => cards.len(),
            _ => 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, View::Searching)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultMeta {
    pub count: usize,
    pub elapsed_secs: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub badge: Option<ScoreBadge>,
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub link: DetailsLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBadge {
    pub percent: u8,
    pub tier: ScoreTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreTier::High => "high",
            ScoreTier::Medium => "medium",
            ScoreTier::Low => "low",
        }
    }
}

/// Opens in a new browsing context without an opener reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsLink {
    pub href: String,
}

impl DetailsLink {
    pub const PLACEHOLDER: &'static str = "#";
    pub const TARGET: &'static str = "_blank";
    pub const REL: &'static str = "noopener noreferrer";

    pub fn is_placeholder(&self) -> bool {
        self.href == Self::PLACEHOLDER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    RateLimited,
    InvalidQuery,
    Failed,
    NoResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}
