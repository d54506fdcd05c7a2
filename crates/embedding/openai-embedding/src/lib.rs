//! # OpenAI Embedding Service
//!
//! This crate provides an implementation of the `EmbeddingService` trait using OpenAI's embedding API.
//!
//! ## OpenAIEmbedding
//!
//! Defaults to `text-embedding-ada-002` (1536 dimensions), the dimension the agent memory
//! index is created with. Other models can be selected with [`OpenAIEmbedding::with_model`],
//! but the vector index dimension must match.
//!
//! ## Example
//!
//! ```rust,no_run
//! use openai_embedding::OpenAIEmbedding;
//! use embedding::EmbeddingService;
//!
//! async fn example() -> Result<(), anyhow::Error> {
//!     let service = OpenAIEmbedding::with_api_key("sk-...".to_string());
//!     let embedding = service.embed("Hello world").await?;
//!     println!("Embedding dimension: {}", embedding.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Input normalization
//!
//! Every input goes through [`embedding::normalize_input`] (newlines become spaces) before
//! it is sent to the API.

use async_openai::{types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use embedding::{normalize_input, EmbeddingConfig, EmbeddingService, DEFAULT_EMBEDDING_MODEL};
use tracing::{debug, info, instrument, warn};

/// Timeout for a single embed request (connect + request + response).
const EMBED_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// OpenAI embedding service implementation. Holds the async-openai client and model name.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAIEmbedding {
    /// Creates a new OpenAI embedding service.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key. If empty, will try to read from OPENAI_API_KEY environment variable.
    /// * `model` - The embedding model to use (e.g., "text-embedding-ada-002").
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a new OpenAI embedding service with an optional base URL (OpenAI-compatible endpoints).
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        } else {
            api_key
        };

        let mut openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            openai_config = openai_config.with_api_base(url);
        }
        let client = Client::with_config(openai_config);

        Self { client, model }
    }

    /// Creates a new OpenAI embedding service with the default model.
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_EMBEDDING_MODEL.to_string())
    }

    /// Builds the service from an [`EmbeddingConfig`] (model, key, optional base URL).
    pub fn from_config(config: &dyn EmbeddingConfig) -> Self {
        Self::new_with_base_url(
            config.openai_api_key().to_string(),
            config.model().to_string(),
            config.openai_base_url(),
        )
    }

    /// Sets a different embedding model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Returns the embedding model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    /// Generates an embedding vector for a single text string.
    ///
    /// Newlines are replaced with spaces, then one create-embedding request is sent with the
    /// configured model. The first vector of the response is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out after 30 seconds, or the response
    /// carries no embedding.
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        let input = normalize_input(text);
        info!(model = %self.model, text_len = input.len(), "step: embedding OpenAI embed request");

        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(vec![input])
            .build()?;

        let embeddings = self.client.embeddings();
        let response = match tokio::time::timeout(EMBED_TIMEOUT, embeddings.create(request)).await {
            Ok(Ok(r)) => {
                debug!("OpenAI embed response received");
                r
            }
            Ok(Err(e)) => {
                warn!(error = %e, "OpenAI embed request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout_secs = EMBED_TIMEOUT.as_secs(), "OpenAI embed request timed out");
                return Err(anyhow::anyhow!(
                    "OpenAI embed request timed out after {} seconds",
                    EMBED_TIMEOUT.as_secs()
                ));
            }
        };

        let embedding = match response.data.into_iter().next() {
            Some(item) => item.embedding,
            None => {
                warn!("OpenAI embed response has no embedding data");
                return Err(anyhow::anyhow!("No embedding in response"));
            }
        };

        info!(dimension = embedding.len(), "step: embedding OpenAI embed done");
        Ok(embedding)
    }
}

#[cfg(test)]
mod openai_embedding_test;
