use std::sync::Arc;

use kanal::AsyncSender;
use ordbok_types::{DisplayMode, SessionEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Stdin input source. Each line is one input event: plain text is a query,
/// `:dir <id>` switches direction, `:mode simple|detailed` toggles
/// annotation detail, `:quit` shuts the session down. Unchanged query text
/// is de-duplicated here, at the boundary.
pub async fn input_loop(
    state: Arc<AppState>,
    event_tx: AsyncSender<SessionEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (mut direction, mut mode) = {
        let config = state.config.read().await;
        let mode = if config.detailed {
            DisplayMode::Detailed
        } else {
            DisplayMode::Simple
        };
        (config.direction.clone(), mode)
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_text = String::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    let _ = event_tx.send(SessionEvent::Shutdown).await;
                    break;
                };
                let line = line.trim();

                if let Some(rest) = line.strip_prefix(":dir ") {
                    direction = rest.trim().to_string();
                    event_tx
                        .send(SessionEvent::SwitchDirection(direction.clone()))
                        .await?;
                } else if let Some(rest) = line.strip_prefix(":mode ") {
                    match rest.trim() {
                        "simple" => mode = DisplayMode::Simple,
                        "detailed" => mode = DisplayMode::Detailed,
                        other => tracing::warn!("unknown mode: {other}"),
                    }
                } else if line == ":quit" {
                    event_tx.send(SessionEvent::Shutdown).await?;
                    break;
                } else {
                    if line == last_text {
                        continue;
                    }
                    last_text = line.to_string();
                    event_tx
                        .send(SessionEvent::QueryInput {
                            text: line.to_string(),
                            mode,
                            direction: direction.clone(),
                        })
                        .await?;
                }
            }
        }
    }

    tracing::info!("input loop exiting");
    Ok(())
}
