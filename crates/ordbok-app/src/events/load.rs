use std::sync::Arc;

use ordbok_loader::LoadOutcome;
use ordbok_types::{LoadStatus, SessionEvent};
use tokio::sync::oneshot;

use crate::events::Session;

/// Kick off a load for `direction`. A load already in flight is superseded:
/// its receiver is dropped here and its late result goes nowhere.
pub async fn start_load(session: &mut Session, direction: &str) -> anyhow::Result<()> {
    tracing::info!("loading dictionary {direction}");
    session.output_tx.send(SessionEvent::ClearResults).await?;
    session
        .output_tx
        .send(SessionEvent::Status(LoadStatus::LoadingStarted))
        .await?;

    let (tx, rx) = oneshot::channel();
    let source = Arc::clone(&session.source);
    let target = direction.to_string();
    tokio::spawn(async move {
        let outcome = ordbok_loader::load(source.as_ref(), &target).await;
        let _ = tx.send(outcome);
    });
    session.loading = Some((direction.to_string(), rx));
    Ok(())
}

pub async fn handle_load_result(
    session: &mut Session,
    outcome: Result<LoadOutcome, oneshot::error::RecvError>,
) -> anyhow::Result<()> {
    let Some((direction, _)) = session.loading.take() else {
        return Ok(());
    };
    match outcome {
        Ok(LoadOutcome::Loaded(lexicon)) => {
            session.lexicon = Some((direction, Arc::new(lexicon)));
            session
                .output_tx
                .send(SessionEvent::Status(LoadStatus::LoadingFinished))
                .await?;
        }
        Ok(LoadOutcome::NotFound) => {
            session
                .output_tx
                .send(SessionEvent::Status(LoadStatus::NotFound))
                .await?;
        }
        Ok(LoadOutcome::Failed(e)) => {
            // The previous tree, if any, stays live for its own direction
            tracing::error!("dictionary {direction} load failed: {e}");
            session
                .output_tx
                .send(SessionEvent::Status(LoadStatus::LoadingFinished))
                .await?;
        }
        Err(_) => {
            tracing::error!("dictionary {direction} loader dropped without a result");
            session
                .output_tx
                .send(SessionEvent::Status(LoadStatus::LoadingFinished))
                .await?;
        }
    }
    Ok(())
}
