use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use kanal::AsyncReceiver;
use whatsplan_config::Config;
use whatsplan_config::ui::OutputFormat;
use whatsplan_core::markup;
use whatsplan_types::{AppEvent, UiUpdate, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Interactive,
    /// Exit after the first finished search
    OneShot,
}

pub async fn ui_loop<W>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: Arc<Config>,
    mode: UiMode,
    mut out: W,
) -> anyhow::Result<()>
where
    W: Write + Send,
{
    let format = config.ui.format;

    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::Render(update) => {
                let rendered = match format {
                    OutputFormat::Text => markup::to_text(&update),
                    OutputFormat::Html => markup::to_html(&update),
                };
                out.write_all(rendered.as_bytes())
                    .context("Failed to write results")?;
                out.flush()?;

                if mode == UiMode::OneShot && is_settled(&update) {
                    return Ok(());
                }
            }
            AppEvent::ThemeChanged(theme) => {
                writeln!(out, "Theme: {}", theme.as_str())?;
            }
            AppEvent::ShowChips(chips) => {
                for (i, chip) in chips.iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, chip)?;
                }
            }
            AppEvent::Quit => {
                tracing::debug!("UI loop stopping");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

/// The search lifecycle has reached a terminal view
fn is_settled(update: &UiUpdate) -> bool {
    update.trigger_enabled && !matches!(update.view, View::Blank | View::Searching)
}
