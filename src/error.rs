use std::path::PathBuf;

/// Failures of the retrieval core.
///
/// Retrieval itself is total over any question string, so the only failure
/// is the one-time textbook load at startup.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("textbook source unavailable at {path:?}: {source}")]
    ResourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
}
