use std::sync::Arc;

use tokio::signal;

pub mod controller;
pub mod events;
pub mod input;
pub mod sink;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ordbok_config::Config::new();
    let source = ordbok_loader::fetch::from_config(&config.source);
    let state = Arc::new(AppState::new(config));

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(source);

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
        }
    };

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::warn!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
            controller.shutdown();
        }
    }

    Ok(())
}
