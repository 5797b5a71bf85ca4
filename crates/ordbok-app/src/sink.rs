use kanal::AsyncReceiver;
use ordbok_types::{LoadStatus, RenderRecord, Separator, SessionEvent};
use tokio_util::sync::CancellationToken;

/// Terminal result sink. Everything visual happens here; the session never
/// touches presentation state.
pub async fn sink_loop(
    output_rx: AsyncReceiver<SessionEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = output_rx.recv() => {
                let Ok(event) = event else { break };
                match event {
                    SessionEvent::ShowResults(records) => {
                        print!("{}", render_plain(&records));
                    }
                    SessionEvent::ClearResults => {
                        // A terminal has nothing to erase
                    }
                    SessionEvent::Status(LoadStatus::LoadingStarted) => {
                        println!("Loading dictionary...");
                    }
                    SessionEvent::Status(LoadStatus::LoadingFinished) => {
                        println!("Dictionary loaded");
                    }
                    SessionEvent::Status(LoadStatus::NotFound) => {
                        println!("Dictionary not found!");
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

/// Flatten records to plain text, mapping separator hints to spaces and
/// newlines. Link targets are for richer renderers and are not shown.
pub fn render_plain(records: &[RenderRecord]) -> String {
    let mut out = String::new();
    for record in records {
        for segment in &record.segments {
            out.push_str(&segment.text);
            match segment.separator {
                Separator::None => {}
                Separator::Space => out.push(' '),
                Separator::Break => out.push('\n'),
            }
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
