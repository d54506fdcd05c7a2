//! # Text Embeddings
//!
//! This crate defines the embedding service interface used by the vector-backed agent memory.

use async_trait::async_trait;

mod config;
pub use config::{EmbeddingConfig, EnvEmbeddingConfig, DEFAULT_EMBEDDING_MODEL};

/// Dimension of vectors produced by the default model (`text-embedding-ada-002`).
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Prepares text for the embeddings API: newlines are replaced with spaces.
pub fn normalize_input(text: &str) -> String {
    text.replace('\n', " ")
}

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;

    /// Reverse lookup of the text behind an embedding identifier.
    ///
    /// No provider in this workspace hands out such identifiers, so the default
    /// implementation always fails. Kept on the trait so a provider with a
    /// retrieve-by-id endpoint can opt in.
    async fn text_of(&self, vector_id: &str) -> Result<String, anyhow::Error> {
        anyhow::bail!(
            "reverse embedding lookup is not supported (requested id {:?})",
            vector_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ZeroEmbedding;

    #[async_trait]
    impl EmbeddingService for ZeroEmbedding {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, anyhow::Error> {
            Ok(vec![0.0; DEFAULT_EMBEDDING_DIM])
        }
    }

    #[test]
    fn test_normalize_input_replaces_newlines() {
        assert_eq!(normalize_input("a\nb\n\nc"), "a b  c");
        assert_eq!(normalize_input("no newline"), "no newline");
    }

    #[tokio::test]
    async fn test_text_of_is_unsupported_by_default() {
        let err = ZeroEmbedding.text_of("42").await.unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }
}
