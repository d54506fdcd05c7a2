use thiserror::Error;

/// Errors returned by agent memory operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Positional access past the end of a list-backed memory.
    #[error("index {index} out of range for memory of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Strict write verification found ids that are not in the index.
    #[error("unknown vector ids: {0:?}")]
    UnknownIds(Vec<String>),

    /// The embedding service failed.
    #[error("embedding request failed: {0:#}")]
    Embedding(anyhow::Error),

    /// The vector store failed or returned an unusable response.
    #[error("vector store request failed: {0:#}")]
    Remote(anyhow::Error),
}
