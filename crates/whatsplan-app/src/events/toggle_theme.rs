use kanal::AsyncSender;
use whatsplan_core::SearchClient;
use whatsplan_core::preferences::save_theme;
use whatsplan_types::AppEvent;

use crate::state::AppState;

pub async fn handle_theme_toggle(
    state: &AppState,
    client: &mut SearchClient,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let theme = client.state().theme.toggled();
    client.set_theme(theme);

    {
        let mut prefs = state.preferences.lock().await;
        match save_theme(&mut *prefs, theme) {
            Ok(()) => tracing::info!("Theme set to {}", theme.as_str()),
            // Theme still applies for this session
            Err(e) => tracing::error!("Failed to persist theme: {}", e),
        }
    }

    app_to_ui_tx.send(AppEvent::ThemeChanged(theme)).await?;

    Ok(())
}
