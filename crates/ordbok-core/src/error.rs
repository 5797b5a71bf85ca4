#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// Raw data could not be parsed into a tree; fatal for that load
    /// attempt, any previously loaded tree stays usable.
    #[error("malformed dictionary: {0}")]
    Malformed(String),

    #[error("dictionary not found: {0}")]
    NotFound(String),

    #[error("dictionary load failed: {0}")]
    LoadFailed(String),

    #[error("invalid direction: {0}")]
    InvalidDirection(String),
}
