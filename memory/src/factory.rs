//! # Memory Factory
//!
//! Picks the backend for a named memory. [`MemoryFactory::select`] reports what happened as a
//! [`BackendSelection`]; [`MemoryFactory::create`] turns that into an [`AgentMemory`], falling
//! back to [`SimpleMemory`] when the vector backend is unconfigured or fails to start.
//!
//! ## Selection
//!
//! 1. Any of `PINECONE_API_KEY`, `PINECONE_ENV`, `OPENAI_API_KEY` missing: simple memory,
//!    nothing remote is touched.
//! 2. Otherwise the [`VectorBackendConnector`] builds the store and embedder, the Pinecone
//!    index is opened (and created when absent), and one embedding of `"test"` is requested
//!    as a liveness probe.
//! 3. Any failure in step 2 is a [`MemoryInitError`]; there are no retries.

use std::sync::Arc;

use embedding::EmbeddingService;
use memory_inmemory::SimpleMemory;
use memory_pinecone::{PineconeClient, PineconeMemory, VectorStore};
use openai_embedding::OpenAIEmbedding;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::agent_memory::AgentMemory;
use crate::config::MemoryConfig;

/// Text embedded once to check the embedding service is reachable.
const PROBE_TEXT: &str = "test";

/// Why the vector backend could not be started.
#[derive(Debug, Error)]
pub enum MemoryInitError {
    #[error("failed to build vector backend clients: {0:#}")]
    Build(anyhow::Error),
    #[error("failed to connect to vector index: {0:#}")]
    Connect(anyhow::Error),
    #[error("embedding liveness probe failed: {0:#}")]
    Probe(anyhow::Error),
}

/// Clients the vector backend is assembled from.
pub struct VectorBackend {
    pub store: Arc<dyn VectorStore>,
    pub embedder: Arc<dyn EmbeddingService>,
}

/// Builds the remote clients for the vector backend.
///
/// Only called when every credential is present.
pub trait VectorBackendConnector: Send + Sync {
    fn build(&self, config: &MemoryConfig) -> anyhow::Result<VectorBackend>;
}

/// Pinecone REST client plus OpenAI embeddings.
#[derive(Debug, Default, Clone, Copy)]
pub struct PineconeConnector;

impl VectorBackendConnector for PineconeConnector {
    fn build(&self, config: &MemoryConfig) -> anyhow::Result<VectorBackend> {
        config.embedding.validate()?;
        // Index name does not matter here; the client only needs credentials and region.
        let client = PineconeClient::new(&config.pinecone_config(""))?;
        let embedder = OpenAIEmbedding::from_config(&config.embedding);
        Ok(VectorBackend {
            store: Arc::new(client),
            embedder: Arc::new(embedder),
        })
    }
}

/// Outcome of [`MemoryFactory::select`].
#[derive(Debug)]
pub enum BackendSelection {
    /// Vector backend connected and the embedding probe succeeded.
    Vector(PineconeMemory),
    /// At least one credential is missing. Nothing was attempted.
    Unconfigured { missing: Vec<&'static str> },
    /// Credentials present but the backend failed to start.
    Failed(MemoryInitError),
}

/// Creates agent memories from a [`MemoryConfig`].
pub struct MemoryFactory {
    config: MemoryConfig,
    connector: Arc<dyn VectorBackendConnector>,
}

impl MemoryFactory {
    /// Factory using the Pinecone connector.
    pub fn new(config: MemoryConfig) -> Self {
        Self::with_connector(config, Arc::new(PineconeConnector))
    }

    pub fn with_connector(config: MemoryConfig, connector: Arc<dyn VectorBackendConnector>) -> Self {
        Self { config, connector }
    }

    /// Factory configured from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(MemoryConfig::from_env()?))
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Tries to start the vector backend for index `name`.
    #[instrument(skip(self))]
    pub async fn select(&self, name: &str) -> BackendSelection {
        let missing = self.config.missing_credentials();
        if !missing.is_empty() {
            return BackendSelection::Unconfigured { missing };
        }

        info!("step: building vector backend");
        let backend = match self.connector.build(&self.config) {
            Ok(backend) => backend,
            Err(e) => return BackendSelection::Failed(MemoryInitError::Build(e)),
        };

        info!("step: connecting to vector index");
        let pinecone_config = self.config.pinecone_config(name);
        let memory = match PineconeMemory::connect(
            backend.store.as_ref(),
            backend.embedder.clone(),
            &pinecone_config,
        )
        .await
        {
            Ok(memory) => memory,
            Err(e) => return BackendSelection::Failed(MemoryInitError::Connect(e)),
        };

        info!("step: probing embedding service");
        if let Err(e) = backend.embedder.embed(PROBE_TEXT).await {
            return BackendSelection::Failed(MemoryInitError::Probe(e));
        }

        BackendSelection::Vector(memory)
    }

    /// Memory for index `name`: the vector backend when it starts, otherwise a fresh
    /// [`SimpleMemory`].
    pub async fn create(&self, name: &str) -> AgentMemory {
        match self.select(name).await {
            BackendSelection::Vector(memory) => {
                info!(index = %name, "Using vector memory");
                AgentMemory::from(memory)
            }
            BackendSelection::Unconfigured { missing } => {
                debug!(?missing, "vector memory not configured, using simple memory");
                AgentMemory::from(SimpleMemory::new())
            }
            BackendSelection::Failed(e) => {
                warn!("{}", fallback_notice(&e));
                AgentMemory::from(SimpleMemory::new())
            }
        }
    }
}

fn fallback_notice(error: &MemoryInitError) -> String {
    format!("Error initializing memory {}\nUsing Simple Memory.", error)
}

impl std::fmt::Debug for MemoryFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFactory")
            .field("namespace", &self.config.namespace)
            .field("write_verification", &self.config.write_verification)
            .finish_non_exhaustive()
    }
}
