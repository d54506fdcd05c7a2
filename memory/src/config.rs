//! Memory configuration loaded from the environment.
//!
//! Read once, when the factory is built. Callers that keep secrets in `.env` load it first
//! (e.g. `dotenvy::dotenv()`).

use std::env;

use anyhow::Result;
use embedding::{EmbeddingConfig, EnvEmbeddingConfig};
use memory_pinecone::{PineconeConfig, WriteVerification};

/// Index name used when the caller does not pick one.
pub const DEFAULT_MEMORY_NAME: &str = "auto-gpt";

/// Namespace records are written to when `MEMORY_NAMESPACE` is unset.
pub const DEFAULT_NAMESPACE: &str = "permanent_memory";

/// Credentials and options for memory backends.
///
/// | Variable | Field | Default |
/// |----------|-------|---------|
/// | `PINECONE_API_KEY` | `pinecone_api_key` | empty |
/// | `PINECONE_ENV` | `pinecone_region` | empty |
/// | `OPENAI_API_KEY` | `embedding.openai_api_key` | empty |
/// | `OPENAI_BASE_URL` | `embedding.openai_base_url` | none |
/// | `EMBEDDING_MODEL` | `embedding.embedding_model` | `text-embedding-ada-002` |
/// | `MEMORY_NAMESPACE` | `namespace` | `permanent_memory` |
/// | `MEMORY_STRICT_WRITES` | `write_verification` | lenient |
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    pub pinecone_api_key: String,
    pub pinecone_region: String,
    pub embedding: EnvEmbeddingConfig,
    pub namespace: String,
    pub write_verification: WriteVerification,
}

impl MemoryConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let pinecone_api_key = env::var("PINECONE_API_KEY").unwrap_or_default();
        let pinecone_region = env::var("PINECONE_ENV").unwrap_or_default();
        let embedding = EnvEmbeddingConfig::from_env()?;
        let namespace = env::var("MEMORY_NAMESPACE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let write_verification = match env::var("MEMORY_STRICT_WRITES").as_deref() {
            Ok(v) if parse_flag(v) => WriteVerification::Strict,
            _ => WriteVerification::Lenient,
        };
        Ok(Self {
            pinecone_api_key,
            pinecone_region,
            embedding,
            namespace,
            write_verification,
        })
    }

    /// Names of the vector-backend credentials that are missing or blank.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.pinecone_api_key.trim().is_empty() {
            missing.push("PINECONE_API_KEY");
        }
        if self.pinecone_region.trim().is_empty() {
            missing.push("PINECONE_ENV");
        }
        if self.embedding.openai_api_key().trim().is_empty() {
            missing.push("OPENAI_API_KEY");
        }
        missing
    }

    /// True when all three vector-backend credentials are present.
    pub fn has_vector_credentials(&self) -> bool {
        self.missing_credentials().is_empty()
    }

    /// Pinecone settings for the index `index_name`.
    pub fn pinecone_config(&self, index_name: &str) -> PineconeConfig {
        PineconeConfig::new(
            self.pinecone_api_key.clone(),
            self.pinecone_region.clone(),
            index_name,
        )
        .with_namespace(self.namespace.clone())
        .with_write_verification(self.write_verification)
    }
}

impl Default for MemoryConfig {
    /// No credentials: always selects the simple backend.
    fn default() -> Self {
        Self {
            pinecone_api_key: String::new(),
            pinecone_region: String::new(),
            embedding: EnvEmbeddingConfig {
                embedding_model: embedding::DEFAULT_EMBEDDING_MODEL.to_string(),
                openai_api_key: String::new(),
                openai_base_url: None,
            },
            namespace: DEFAULT_NAMESPACE.to_string(),
            write_verification: WriteVerification::Lenient,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
