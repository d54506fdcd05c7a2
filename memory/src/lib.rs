//! # Memory Crate
//!
//! Agent memory with a pluggable backend: store text snippets and later retrieve the ones most
//! relevant to a query.
//!
//! ## Backends
//!
//! - [`SimpleMemory`] - in-process list; `get_relevant` returns everything, unranked
//! - [`PineconeMemory`] - OpenAI embeddings stored in a Pinecone index, ranked by similarity
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use memory::{Memory, MemoryFactory, MemoryRegistry, DEFAULT_MEMORY_NAME};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let registry = MemoryRegistry::new(MemoryFactory::from_env()?);
//! let memory = registry.get_or_create(DEFAULT_MEMORY_NAME).await;
//!
//! memory.add("The user prefers short answers").await?;
//! let relevant = memory.get_relevant("answer style", 5).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - credentials and options from the environment
//! - [`factory`] - backend selection with explicit fallback
//! - [`registry`] - one shared handle per `(backend, name)`
//! - [`agent_memory`] - the handle type callers hold
//!
//! ## Concurrency
//!
//! Handles are `Clone + Send + Sync` and share their store. Both backends lock internally,
//! but the memory is still meant to have one logical owner: interleaved `add`/`delete` from
//! several tasks see each other's index shifts (simple backend) and counter values (vector
//! backend).

pub mod agent_memory;
pub mod config;
pub mod factory;
pub mod registry;

pub use agent_memory::AgentMemory;
pub use config::{MemoryConfig, DEFAULT_MEMORY_NAME, DEFAULT_NAMESPACE};
pub use factory::{
    BackendSelection, MemoryFactory, MemoryInitError, PineconeConnector, VectorBackend,
    VectorBackendConnector,
};
pub use registry::MemoryRegistry;

pub use embedding::{normalize_input, EmbeddingService};
pub use memory_core::{
    BackendKind, IndexStats, Memory, MemoryError, MemoryStats, DEFAULT_NUM_RELEVANT, OBLIVIATED,
};
pub use memory_inmemory::SimpleMemory;
pub use memory_pinecone::{PineconeConfig, PineconeMemory, WriteVerification};
