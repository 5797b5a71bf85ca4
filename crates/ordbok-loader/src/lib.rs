pub mod fetch;
pub mod parse;

use ordbok_core::error::DictError;
use ordbok_core::trie::Lexicon;

use crate::fetch::{DictionarySource, FetchOutcome};

/// Result of one load attempt, collapsed to what the session cares about.
pub enum LoadOutcome {
    Loaded(Lexicon),
    NotFound,
    Failed(DictError),
}

/// Fetch and parse the dictionary for a direction. Exactly one outcome per
/// attempt; a parse failure never destroys a previously loaded tree, that
/// is the caller's to keep.
pub async fn load(source: &dyn DictionarySource, direction: &str) -> LoadOutcome {
    match source.fetch(direction).await {
        FetchOutcome::Loaded(raw) => match parse::parse(&raw) {
            Ok(lexicon) => {
                tracing::info!(
                    "loaded dictionary {direction}: {} entries",
                    lexicon.entry_count()
                );
                LoadOutcome::Loaded(lexicon)
            }
            Err(e) => {
                tracing::error!("dictionary {direction} is malformed: {e}");
                LoadOutcome::Failed(e)
            }
        },
        FetchOutcome::NotFound => {
            tracing::warn!("dictionary {direction} not found");
            LoadOutcome::NotFound
        }
        FetchOutcome::Failed(reason) => {
            tracing::error!("dictionary {direction} failed to load: {reason}");
            LoadOutcome::Failed(DictError::LoadFailed(reason))
        }
    }
}
