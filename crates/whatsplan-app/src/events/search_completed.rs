use kanal::AsyncSender;
use whatsplan_core::{Completion, SearchClient};
use whatsplan_types::{AppEvent, Outcome};

pub async fn handle_search_completed(
    client: &mut SearchClient,
    seq: u64,
    outcome: Outcome,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match client.finish(seq, &outcome) {
        Completion::Applied => {
            app_to_ui_tx.send(AppEvent::Render(client.ui_update())).await?;
        }
        Completion::Stale => {}
    }

    Ok(())
}
