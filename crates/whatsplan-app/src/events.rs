use std::ops::ControlFlow;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use whatsplan_client::SearchBackend;
use whatsplan_core::SearchClient;
use whatsplan_types::AppEvent;

use crate::state::AppState;

pub mod search_completed;
pub mod submit_query;
pub mod toggle_theme;

use search_completed::handle_search_completed;
use submit_query::handle_submit;
use toggle_theme::handle_theme_toggle;

/// App's main loop. Sole owner of the search lifecycle.
pub async fn event_loop(
    state: Arc<AppState>,
    backend: Arc<dyn SearchBackend>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let theme = state.initial_theme().await;
    let api = &state.config.api;
    tracing::info!(
        "Search endpoint {} (timeout {}s)",
        api.search_url,
        api.timeout_seconds
    );
    let mut client = SearchClient::from_config(backend, api, theme);

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;

        let flow = handle_events(
            &state,
            &mut client,
            &ui_to_app_tx,
            &app_to_ui_tx,
            event,
        )
        .await?;

        if flow.is_break() {
            tracing::info!("[EVENT_LOOP] Quit requested");
            return Ok(());
        }
    }
}

async fn handle_events(
    state: &AppState,
    client: &mut SearchClient,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<ControlFlow<()>> {
    match event {
        AppEvent::SubmitQuery(raw) => {
            handle_submit(client, raw, ui_to_app_tx, app_to_ui_tx).await?;
        }
        AppEvent::SelectChip(index) => {
            match state.config.ui.chip(index).map(String::from) {
                Some(text) => {
                    tracing::debug!("Chip {} selected: {}", index, text);
                    handle_submit(client, text, ui_to_app_tx, app_to_ui_tx).await?;
                }
                None => tracing::warn!("No query chip at index {}", index),
            }
        }
        AppEvent::ListChips => {
            let chips = state.config.ui.chips.clone();
            app_to_ui_tx.send(AppEvent::ShowChips(chips)).await?;
        }
        AppEvent::ToggleTheme => {
            handle_theme_toggle(state, client, app_to_ui_tx).await?;
        }
        AppEvent::SearchCompleted { seq, outcome } => {
            handle_search_completed(client, seq, outcome, app_to_ui_tx).await?;
        }
        AppEvent::Quit => {
            app_to_ui_tx.send(AppEvent::Quit).await?;
            return Ok(ControlFlow::Break(()));
        }
        AppEvent::Render(_) | AppEvent::ThemeChanged(_) | AppEvent::ShowChips(_) => {
            // UI-only events, ignore in backend
        }
    }

    Ok(ControlFlow::Continue(()))
}
