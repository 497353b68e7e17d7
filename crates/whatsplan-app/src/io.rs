use kanal::AsyncSender;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use whatsplan_types::AppEvent;

/// Read user input line by line and forward it to the app.
/// End of input is treated as a quit request.
pub async fn input_loop<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = cancel.cancelled() => {
                tracing::info!("Input reader stopping");
                return Ok(());
            }
        };

        let Some(line) = line else {
            tracing::debug!("Input closed");
            event_tx.send(AppEvent::Quit).await?;
            return Ok(());
        };

        match parse_command(&line) {
            Some(event) => {
                let quit = matches!(event, AppEvent::Quit);
                event_tx.send(event).await?;
                if quit {
                    return Ok(());
                }
            }
            None => tracing::warn!("Unknown command: {}", line.trim()),
        }
    }
}

/// Lines starting with `:` are commands, anything else is a query.
/// Chip numbers are 1-based.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Some(AppEvent::SubmitQuery(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("q" | "quit"), None, None) => Some(AppEvent::Quit),
        (Some("theme"), None, None) => Some(AppEvent::ToggleTheme),
        (Some("chips"), None, None) => Some(AppEvent::ListChips),
        (Some("chip"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Some(AppEvent::SelectChip(n - 1)),
            _ => None,
        },
        _ => None,
    }
}
