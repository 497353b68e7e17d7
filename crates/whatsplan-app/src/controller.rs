use std::io::Write;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::BufReader;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use whatsplan_client::SearchBackend;
use whatsplan_types::AppEvent;

use crate::events::event_loop;
use crate::io::input_loop;
use crate::state::AppState;
use crate::ui::{UiMode, ui_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    backend: Arc<dyn SearchBackend>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            backend,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Background tasks. The UI loop is driven separately by the caller.
    pub fn spawn_tasks(&self, mode: UiMode) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.backend.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Stdin reader
        if mode == UiMode::Interactive {
            tasks.spawn(input_loop(
                BufReader::new(tokio::io::stdin()),
                self.cancel_token.child_token(),
                self.channels.ui_to_app.0.clone(),
            ));
        }

        tasks
    }

    pub async fn ui_loop<W>(&self, mode: UiMode, out: W) -> anyhow::Result<()>
    where
        W: Write + Send,
    {
        ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.state.config.clone(),
            mode,
            out,
        )
        .await
    }

    /// Inject an event as if it came from the UI
    pub async fn send(&self, event: AppEvent) -> anyhow::Result<()> {
        self.channels.ui_to_app.0.send(event).await?;
        Ok(())
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
