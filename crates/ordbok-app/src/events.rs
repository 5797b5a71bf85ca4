use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use ordbok_core::debounce::Debouncer;
use ordbok_core::trie::Lexicon;
use ordbok_loader::LoadOutcome;
use ordbok_loader::fetch::DictionarySource;
use ordbok_types::SessionEvent;
use tokio::sync::oneshot;
use tokio::time::sleep_until;

use crate::state::AppState;

pub mod load;
pub mod query_input;

use load::{handle_load_result, start_load};
use query_input::{handle_fire, handle_query_input};

/// One dictionary session: the current tree, the debouncer, and whatever
/// load is in flight. All mutation happens on the event-loop task.
pub struct Session {
    /// Loaded tree, keyed by the direction it was loaded for
    pub lexicon: Option<(String, Arc<Lexicon>)>,
    /// Direction queries are currently aimed at
    pub direction: String,
    pub debouncer: Debouncer,
    pub loading: Option<(String, oneshot::Receiver<LoadOutcome>)>,
    pub source: Arc<dyn DictionarySource>,
    pub output_tx: AsyncSender<SessionEvent>,
}

/// Session main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<SessionEvent>,
    output_tx: AsyncSender<SessionEvent>,
    source: Arc<dyn DictionarySource>,
) -> anyhow::Result<()> {
    let (quiet_period, direction) = {
        let config = state.config.read().await;
        (
            Duration::from_millis(config.lookup.quiet_period_ms),
            config.direction.clone(),
        )
    };

    let mut session = Session {
        lexicon: None,
        direction: direction.clone(),
        debouncer: Debouncer::new(quiet_period),
        loading: None,
        source,
        output_tx,
    };

    start_load(&mut session, &direction).await?;

    loop {
        let deadline = session.debouncer.deadline();
        tokio::select! {
            event = input_rx.recv() => {
                match event {
                    Ok(SessionEvent::Shutdown) => break,
                    Ok(event) => handle_event(&mut session, event).await?,
                    // Input side went away
                    Err(_) => break,
                }
            }
            outcome = async {
                let rx = &mut session.loading.as_mut().expect("load in flight").1;
                rx.await
            }, if session.loading.is_some() => {
                handle_load_result(&mut session, outcome).await?;
            }
            _ = async { sleep_until(tokio::time::Instant::from_std(deadline.expect("deadline armed"))).await },
                if deadline.is_some() =>
            {
                handle_fire(&mut session).await?;
            }
        }
    }

    tracing::info!("session event loop exiting");
    Ok(())
}

async fn handle_event(session: &mut Session, event: SessionEvent) -> anyhow::Result<()> {
    match event {
        SessionEvent::QueryInput {
            text,
            mode,
            direction,
        } => {
            handle_query_input(session, text, mode, direction).await?;
        }
        SessionEvent::SwitchDirection(direction) => {
            session.direction = direction.clone();
            start_load(session, &direction).await?;
        }
        SessionEvent::ShowResults(_) | SessionEvent::ClearResults | SessionEvent::Status(_) => {
            // Outbound events, nothing to handle on the way in
        }
        SessionEvent::Shutdown => {}
    }
    Ok(())
}
