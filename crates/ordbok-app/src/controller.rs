use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use ordbok_loader::fetch::DictionarySource;
use ordbok_types::SessionEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::input::input_loop;
use crate::sink::sink_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_session: (AsyncSender<SessionEvent>, AsyncReceiver<SessionEvent>),
    pub session_to_sink: (AsyncSender<SessionEvent>, AsyncReceiver<SessionEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input_to_session: kanal::bounded_async(64),   // keystrokes
            session_to_sink: kanal::bounded_async(256),   // result bursts
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, source: Arc<dyn DictionarySource>) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Session event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input_to_session.1.clone(),
            self.channels.session_to_sink.0.clone(),
            source,
        ));

        // Stdin input source
        tasks.spawn(input_loop(
            self.state.clone(),
            self.channels.input_to_session.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Terminal result sink
        tasks.spawn(sink_loop(
            self.channels.session_to_sink.1.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
