//! HTML and plain-text output for a [`UiUpdate`].
//!
//! All event-supplied text is escaped before interpolation: HTML entities for
//! markup, control characters stripped for the terminal.

use std::fmt::Write;

use whatsplan_types::{Card, DetailsLink, Notice, NoticeKind, ResultMeta, UiUpdate, View};

pub const SEARCHING_MESSAGE: &str = "Searching for events. Please wait...";
pub const DETAILS_LABEL: &str = "View Source/Details →";
pub const SUBMIT_LABEL: &str = "Find Events";
pub const SUBMIT_BUSY_LABEL: &str = "Searching...";

pub fn to_html(update: &UiUpdate) -> String {
    let mut out = String::new();
    let disabled = if update.trigger_enabled { "" } else { " disabled" };
    let label = submit_label(update.trigger_enabled);

    let _ = writeln!(out, r#"<main data-theme="{}">"#, update.theme.as_str());
    let _ = writeln!(out, r#"  <button type="submit"{disabled}>{label}</button>"#);

    if let Some(meta) = visible_meta(&update.view) {
        let _ = writeln!(out, r#"  <p class="result-meta">{}</p>"#, escape(&meta_line(meta)));
    }

    out.push_str("  <section id=\"results\">\n");
    match &update.view {
        View::Blank => {}
        View::Searching => {
            let _ = writeln!(out, r#"    <p class="message loading">{SEARCHING_MESSAGE}</p>"#);
        }
        View::Notice(notice) => {
            let _ = writeln!(
                out,
                r#"    <p class="message {}">{}</p>"#,
                notice_class(notice.kind),
                escape(&notice.message)
            );
        }
        View::Cards { cards, .. } => {
            for card in cards {
                card_html(&mut out, card);
            }
        }
    }
    out.push_str("  </section>\n</main>\n");

    out
}

fn card_html(out: &mut String, card: &Card) {
    out.push_str("    <div class=\"event-card\">\n");
    if let Some(badge) = card.badge {
        let _ = writeln!(
            out,
            r#"      <span class="score-badge {}">{}%</span>"#,
            badge.tier.as_str(),
            badge.percent
        );
    }
    let _ = writeln!(out, "      <h3>{}</h3>", escape(&card.title));
    let _ = writeln!(out, "      <p><strong>Date:</strong> {}</p>", escape(&card.date));
    let _ = writeln!(
        out,
        "      <p><strong>Location:</strong> {}</p>",
        escape(&card.location)
    );
    let _ = writeln!(out, "      <p>{}</p>", escape(&card.description));
    let _ = writeln!(
        out,
        r#"      <a href="{}" target="{}" rel="{}">{DETAILS_LABEL}</a>"#,
        escape(&card.link.href),
        DetailsLink::TARGET,
        DetailsLink::REL
    );
    out.push_str("    </div>\n");
}

pub fn to_text(update: &UiUpdate) -> String {
    let mut out = String::new();

    if let Some(meta) = visible_meta(&update.view) {
        let _ = writeln!(out, "{}\n", meta_line(meta));
    }

    match &update.view {
        View::Blank => {}
        View::Searching => {
            let _ = writeln!(out, "{SEARCHING_MESSAGE}");
        }
        View::Notice(notice) => {
            let _ = writeln!(out, "{}", notice_text(notice));
        }
        View::Cards { cards, .. } => {
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                card_text(&mut out, card);
            }
        }
    }

    out
}

fn card_text(out: &mut String, card: &Card) {
    let title = sanitize_terminal(&card.title);
    match card.badge {
        Some(badge) => {
            let _ = writeln!(out, "{title} [{}% {}]", badge.percent, badge.tier.as_str());
        }
        None => {
            let _ = writeln!(out, "{title}");
        }
    }
    let _ = writeln!(out, "  Date: {}", sanitize_terminal(&card.date));
    let _ = writeln!(out, "  Location: {}", sanitize_terminal(&card.location));
    let _ = writeln!(out, "  {}", sanitize_terminal(&card.description));
    let _ = writeln!(out, "  {}", sanitize_terminal(&card.link.href));
}

fn notice_text(notice: &Notice) -> String {
    let prefix = match notice.kind {
        NoticeKind::RateLimited => "[rate limited]",
        NoticeKind::InvalidQuery => "[invalid query]",
        NoticeKind::Failed => "[error]",
        NoticeKind::NoResults => "[no results]",
    };
    format!("{prefix} {}", sanitize_terminal(&notice.message))
}

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::RateLimited => "rate-limited",
        NoticeKind::InvalidQuery => "warning",
        NoticeKind::Failed => "error",
        NoticeKind::NoResults => "empty",
    }
}

pub fn submit_label(trigger_enabled: bool) -> &'static str {
    if trigger_enabled {
        SUBMIT_LABEL
    } else {
        SUBMIT_BUSY_LABEL
    }
}

/// Count and timing are only shown next to rendered cards
fn visible_meta(view: &View) -> Option<&ResultMeta> {
    match view {
        View::Cards { meta, .. } => Some(meta),
        _ => None,
    }
}

pub fn meta_line(meta: &ResultMeta) -> String {
    let noun = if meta.count == 1 { "event" } else { "events" };
    match meta.elapsed_secs {
        Some(secs) => format!("{} {noun} found in {secs:.2}s", meta.count),
        None => format!("{} {noun} found", meta.count),
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drop control characters (ESC, BEL, CR, ...) so backend text cannot drive the terminal
pub fn sanitize_terminal(text: &str) -> String {
    text.chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}
