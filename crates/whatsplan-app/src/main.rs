use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use whatsplan_client::HttpSearchClient;
use whatsplan_config::Config;
use whatsplan_config::ui::OutputFormat;
use whatsplan_core::preferences::{self, FilePreferences};
use whatsplan_types::{AppEvent, Query};

pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;
use self::ui::UiMode;

const DEFAULT_LOG_FILTER: &str = "whatsplan_app=info,whatsplan_core=info,whatsplan_client=info";

/// Find real-world events from a free-text query.
///
/// Without --query or --chip, reads queries from stdin. Commands:
/// `:chips`, `:chip N`, `:theme`, `:quit`.
#[derive(Parser, Debug)]
#[command(name = "whatsplan", version, about)]
struct Cli {
    /// Run a single search and exit
    #[arg(long, conflicts_with = "chip")]
    query: Option<String>,

    /// Run preset query N (1-based) and exit
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    chip: Option<u16>,

    /// Search endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Output format: text or html
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Preferences file
    #[arg(long)]
    prefs: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.endpoint {
            config.api.search_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.api.timeout_seconds = secs;
        }
        if let Some(format) = self.format {
            config.ui.format = format;
        }
        if let Some(path) = &self.prefs {
            config.preferences.path = path.clone();
        }
    }

    /// The event to run in one-shot mode, validated up front so the UI never waits on nothing
    fn initial_event(&self, config: &Config) -> anyhow::Result<Option<AppEvent>> {
        if let Some(query) = &self.query {
            if Query::parse(query).is_none() {
                anyhow::bail!("Query must not be blank");
            }
            return Ok(Some(AppEvent::SubmitQuery(query.clone())));
        }

        if let Some(chip) = self.chip {
            let index = usize::from(chip) - 1;
            if config.ui.chip(index).is_none() {
                anyhow::bail!(
                    "No query chip {chip}, {} configured",
                    config.ui.chips.len()
                );
            }
            return Ok(Some(AppEvent::SelectChip(index)));
        }

        Ok(None)
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::new();
    cli.apply(&mut config);

    let initial_event = cli.initial_event(&config)?;
    let mode = if initial_event.is_some() {
        UiMode::OneShot
    } else {
        UiMode::Interactive
    };

    let prefs = FilePreferences::load(&config.preferences.path)
        .context("Failed to load preferences")?;
    let backend = Arc::new(HttpSearchClient::new(config.api.search_url.clone()));
    let state = Arc::new(AppState::new(config, prefs, preferences::os_prefers_dark()));

    let controller = AppController::new(state, backend);
    let mut tasks = controller.spawn_tasks(mode);

    if let Some(event) = initial_event {
        controller.send(event).await?;
    }

    let ui = controller.ui_loop(mode, std::io::stdout());
    tokio::pin!(ui);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                break;
            }
            result = &mut ui => {
                if let Err(e) = result {
                    tracing::error!("UI loop failed: {e:#}");
                }
                break;
            }
            Some(joined) = tasks.join_next() => match joined {
                Ok(Ok(())) => tracing::debug!("Background task finished"),
                Ok(Err(e)) => {
                    tracing::error!("Background task failed: {e:#}");
                    break;
                }
                Err(e) => {
                    tracing::error!("Background task panicked: {e}");
                    break;
                }
            },
        }
    }

    controller.shutdown();
    tasks.abort_all();

    Ok(())
}
