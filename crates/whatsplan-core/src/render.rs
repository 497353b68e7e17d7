use whatsplan_types::{
    Card, DetailsLink, EventRecord, Notice, NoticeKind, Outcome, ResultMeta, ScoreBadge,
    ScoreTier, View,
};

pub const DATE_PLACEHOLDER: &str = "Date TBD";
pub const LOCATION_PLACEHOLDER: &str = "Location not specified";
pub const DESCRIPTION_FALLBACK: &str = "No description available.";

pub const NO_RESULTS_MESSAGE: &str =
    "No events found for that query. Try broadening your terms or checking a different date.";
pub const INVALID_QUERY_MESSAGE: &str = "That doesn't look like an event search. Include both a type of event and a location, e.g. \"jazz concerts in Chicago\".";
pub const RATE_LIMITED_MESSAGE: &str =
    "Too many searches in a short time. Please wait a moment and try again.";

const HIGH_TIER: f64 = 0.7;
const MEDIUM_TIER: f64 = 0.4;

/// Build the view for a finished search
pub fn render_outcome(outcome: &Outcome) -> View {
    match outcome {
        Outcome::Events {
            events,
            elapsed_time,
        } => render_events(events, *elapsed_time),
        Outcome::InvalidQuery => View::Notice(notice(NoticeKind::InvalidQuery)),
        Outcome::RateLimited => View::Notice(notice(NoticeKind::RateLimited)),
        Outcome::Failed(detail) => View::Notice(failure_notice(detail)),
    }
}

/// Cards in input order, or the empty-state notice. Always built from scratch.
pub fn render_events(events: &[EventRecord], elapsed_secs: Option<f64>) -> View {
    if events.is_empty() {
        return View::Notice(notice(NoticeKind::NoResults));
    }

    let cards: Vec<Card> = events.iter().map(render_card).collect();
    let meta = ResultMeta {
        count: cards.len(),
        elapsed_secs: elapsed_secs.filter(|secs| secs.is_finite() && *secs >= 0.0),
    };

    View::Cards { cards, meta }
}

pub fn render_card(event: &EventRecord) -> Card {
    Card {
        badge: event.score.and_then(score_badge),
        title: event.title.clone(),
        date: or_placeholder(event.date.as_deref(), DATE_PLACEHOLDER),
        location: or_placeholder(event.location.as_deref(), LOCATION_PLACEHOLDER),
        description: or_placeholder(event.description.as_deref(), DESCRIPTION_FALLBACK),
        link: DetailsLink {
            href: or_placeholder(event.url.as_deref(), DetailsLink::PLACEHOLDER),
        },
    }
}

/// `None` for non-finite scores. Out-of-range scores are clamped to [0, 1].
pub fn score_badge(score: f64) -> Option<ScoreBadge> {
    if !score.is_finite() {
        return None;
    }

    let score = score.clamp(0.0, 1.0);
    let tier = if score >= HIGH_TIER {
        ScoreTier::High
    } else if score >= MEDIUM_TIER {
        ScoreTier::Medium
    } else {
        ScoreTier::Low
    };

    Some(ScoreBadge {
        percent: (score * 100.0).round() as u8,
        tier,
    })
}

pub fn notice(kind: NoticeKind) -> Notice {
    let message = match kind {
        NoticeKind::RateLimited => RATE_LIMITED_MESSAGE,
        NoticeKind::InvalidQuery => INVALID_QUERY_MESSAGE,
        NoticeKind::NoResults => NO_RESULTS_MESSAGE,
        NoticeKind::Failed => crate::outcome::FALLBACK_FAILURE,
    };

    Notice {
        kind,
        message: message.to_string(),
    }
}

pub fn failure_notice(detail: &str) -> Notice {
    let detail = detail.trim().trim_end_matches('.');
    let detail = if detail.is_empty() {
        crate::outcome::FALLBACK_FAILURE.trim_end_matches('.')
    } else {
        detail
    };

    Notice {
        kind: NoticeKind::Failed,
        message: format!("Error: {detail}. Make sure the search backend is running."),
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}
