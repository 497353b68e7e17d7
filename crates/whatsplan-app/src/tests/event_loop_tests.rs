use std::time::Duration;

use whatsplan_client::SearchError;
use whatsplan_core::preferences::{PreferenceStore, THEME_KEY};
use whatsplan_types::{AppEvent, NoticeKind, Theme, UiUpdate, View};

use super::{Harness, ScriptedBackend, two_events};

fn expect_render(event: AppEvent) -> UiUpdate {
    match event {
        AppEvent::Render(update) => update,
        other => panic!("Wrong event type: {:?}", other),
    }
}

#[tokio::test]
async fn submit_renders_loading_then_cards() {
    let backend = ScriptedBackend::new(Duration::ZERO, two_events);
    let harness = Harness::start(backend.clone());

    harness
        .send(AppEvent::SubmitQuery("  Jazz in Chicago  ".into()))
        .await;

    let loading = expect_render(harness.next().await);
    assert_eq!(loading.view, View::Searching);
    assert!(!loading.trigger_enabled);

    let done = expect_render(harness.next().await);
    assert!(done.trigger_enabled);
    assert_eq!(done.view.card_count(), 2);
    assert_eq!(backend.queries.lock().unwrap().as_slice(), ["Jazz in Chicago"]);
}

#[tokio::test]
async fn blank_submit_sends_nothing() {
    let backend = ScriptedBackend::new(Duration::ZERO, two_events);
    let harness = Harness::start(backend.clone());

    harness.send(AppEvent::SubmitQuery("   ".into())).await;
    harness.send(AppEvent::Quit).await;

    assert!(matches!(harness.next().await, AppEvent::Quit));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn submit_while_loading_is_ignored() {
    let backend = ScriptedBackend::new(Duration::from_millis(200), two_events);
    let harness = Harness::start(backend.clone());

    harness.send(AppEvent::SubmitQuery("Jazz in Chicago".into())).await;
    let loading = expect_render(harness.next().await);
    assert!(!loading.trigger_enabled);

    harness.send(AppEvent::SubmitQuery("Comedy in Austin".into())).await;

    let done = expect_render(harness.next().await);
    assert!(done.trigger_enabled);
    assert_eq!(backend.calls(), 1);

    // Exactly one re-enabling render per completed request
    harness.send(AppEvent::Quit).await;
    assert!(matches!(harness.next().await, AppEvent::Quit));
}

#[tokio::test]
async fn rate_limit_renders_retry_notice() {
    let backend = ScriptedBackend::new(Duration::ZERO, || Err(SearchError::RateLimited));
    let harness = Harness::start(backend);

    harness.send(AppEvent::SubmitQuery("Jazz in Chicago".into())).await;
    let _loading = harness.next().await;

    let done = expect_render(harness.next().await);
    assert!(done.trigger_enabled);
    match done.view {
        View::Notice(notice) => assert_eq!(notice.kind, NoticeKind::RateLimited),
        other => panic!("expected notice, got {other:?}"),
    }
}

#[tokio::test]
async fn chip_submits_its_query() {
    let backend = ScriptedBackend::new(Duration::ZERO, two_events);
    let harness = Harness::start(backend.clone());

    harness.send(AppEvent::SelectChip(1)).await;
    let _loading = harness.next().await;
    let _done = harness.next().await;

    assert_eq!(backend.queries.lock().unwrap().as_slice(), ["Comedy in Austin"]);
}

#[tokio::test]
async fn unknown_chip_is_ignored() {
    let backend = ScriptedBackend::new(Duration::ZERO, two_events);
    let harness = Harness::start(backend.clone());

    harness.send(AppEvent::SelectChip(9)).await;
    harness.send(AppEvent::ListChips).await;

    match harness.next().await {
        AppEvent::ShowChips(chips) => assert_eq!(chips.len(), 2),
        other => panic!("Wrong event type: {:?}", other),
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn theme_toggle_is_persisted() {
    let backend = ScriptedBackend::new(Duration::ZERO, two_events);
    let harness = Harness::start(backend);

    harness.send(AppEvent::ToggleTheme).await;
    match harness.next().await {
        AppEvent::ThemeChanged(theme) => assert_eq!(theme, Theme::Dark),
        other => panic!("Wrong event type: {:?}", other),
    }

    harness.send(AppEvent::ToggleTheme).await;
    assert!(matches!(harness.next().await, AppEvent::ThemeChanged(Theme::Light)));

    let prefs = harness.state.preferences.lock().await;
    assert_eq!(prefs.get(THEME_KEY), Some("light"));
}
