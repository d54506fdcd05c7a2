//! Embedding configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Model used when `EMBEDDING_MODEL` is not set.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    fn model(&self) -> &str;
    /// API key for OpenAI-compatible embedding (OPENAI_API_KEY).
    fn openai_api_key(&self) -> &str;
    /// Optional base URL for OpenAI-compatible embedding (OPENAI_BASE_URL).
    fn openai_base_url(&self) -> Option<&str>;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub embedding_model: String,
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn model(&self) -> &str {
        &self.embedding_model
    }
    fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn openai_base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref().filter(|s| !s.is_empty())
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let embedding_model = env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = env::var("OPENAI_BASE_URL").ok().filter(|s| !s.trim().is_empty());
        Ok(Self {
            embedding_model,
            openai_api_key,
            openai_base_url,
        })
    }

    /// Validate config (the OpenAI provider needs an API key).
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY must be set to generate embeddings");
        }
        Ok(())
    }
}
