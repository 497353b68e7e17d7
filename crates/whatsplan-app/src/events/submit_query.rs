use kanal::AsyncSender;
use whatsplan_core::SearchClient;
use whatsplan_core::outcome::FALLBACK_FAILURE;
use whatsplan_types::{AppEvent, Outcome};

/// Start a search unless one is already loading. The outcome comes back to
/// the event loop as `AppEvent::SearchCompleted`.
pub async fn handle_submit(
    client: &mut SearchClient,
    raw: String,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !client.state().trigger_enabled() {
        tracing::warn!("Search already in progress, ignoring submission");
        return Ok(());
    }

    let Some(pending) = client.begin(&raw) else {
        tracing::debug!("Ignoring blank query");
        return Ok(());
    };

    let seq = pending.seq();
    tracing::debug!("Search seq={} started for '{}'", seq, pending.query());

    app_to_ui_tx.send(AppEvent::Render(client.ui_update())).await?;

    let tx = ui_to_app_tx.clone();
    tokio::spawn(async move {
        // A panicking request must still finish the lifecycle
        let outcome = match tokio::spawn(pending.run()).await {
            Ok((_, outcome)) => outcome,
            Err(e) => {
                tracing::error!("Search task seq={seq} panicked: {e}");
                Outcome::Failed(FALLBACK_FAILURE.to_string())
            }
        };

        if let Err(e) = tx.send(AppEvent::SearchCompleted { seq, outcome }).await {
            tracing::error!("Failed to deliver search result: {}", e);
        }
    });

    Ok(())
}
