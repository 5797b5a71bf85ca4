use ordbok_core::debounce::{Query, Submission};
use ordbok_core::direction::Direction;
use ordbok_core::lookup::lookup;
use ordbok_core::render::format_entry;
use ordbok_types::{DisplayMode, RenderRecord, SessionEvent};

use crate::events::Session;
use crate::events::load::start_load;

pub async fn handle_query_input(
    session: &mut Session,
    text: String,
    mode: DisplayMode,
    direction: String,
) -> anyhow::Result<()> {
    if direction != session.direction {
        session.direction = direction.clone();
        start_load(session, &direction).await?;
    }
    if session.loading.is_some() {
        // Dropped, not queued: no tree to search until the load settles
        tracing::debug!("load in flight, dropping query '{text}'");
        return Ok(());
    }

    let now = tokio::time::Instant::now().into_std();
    let query = Query {
        text,
        mode,
        direction,
    };
    match session.debouncer.submit(query, now) {
        Submission::Armed(_) => {}
        Submission::Cleared => {
            session.output_tx.send(SessionEvent::ClearResults).await?;
        }
    }
    Ok(())
}

/// The quiet period elapsed: run the matcher against the current tree and
/// surface the result unless a newer query got in first.
pub async fn handle_fire(session: &mut Session) -> anyhow::Result<()> {
    let now = tokio::time::Instant::now().into_std();
    let Some((query, generation)) = session.debouncer.fire(now) else {
        return Ok(());
    };

    let records = match run_query(session, &query) {
        Some(records) => records,
        None => {
            session.debouncer.finish(generation);
            return Ok(());
        }
    };

    if session.debouncer.finish(generation) {
        session
            .output_tx
            .send(SessionEvent::ShowResults(records))
            .await?;
    }
    Ok(())
}

fn run_query(session: &Session, query: &Query) -> Option<Vec<RenderRecord>> {
    let (loaded_direction, lexicon) = session.lexicon.as_ref()?;
    if *loaded_direction != query.direction {
        tracing::debug!(
            "tree is for {loaded_direction}, dropping query aimed at {}",
            query.direction
        );
        return None;
    }
    let direction: Direction = match query.direction.parse() {
        Ok(direction) => direction,
        Err(e) => {
            tracing::warn!("{e}");
            return None;
        }
    };

    let matches = lookup(lexicon, &query.text);
    tracing::debug!("query '{}': {} matches", query.text, matches.len());
    Some(
        matches
            .iter()
            .map(|entry| format_entry(entry, query.mode, &direction))
            .collect(),
    )
}
