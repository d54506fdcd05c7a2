//! # Memory Core
//!
//! Core types and the [`Memory`] trait shared by every agent memory backend.
//!
//! ## Backends
//!
//! - `memory-inmemory::SimpleMemory`: ordered in-process list, no ranking.
//! - `memory-pinecone::PineconeMemory`: embeddings + nearest-neighbor query against a hosted index.
//!
//! Backends expose extra, backend-specific operations (positional `get`/`delete` for the simple
//! list, id-based `delete`/`overwrite` for the vector index) on their concrete types. The trait
//! only covers what both can honor.

mod error;
mod store;
mod types;

pub use error::MemoryError;
pub use store::{Memory, DEFAULT_NUM_RELEVANT};
pub use types::{BackendKind, IndexStats, MemoryRecord, MemoryStats, OBLIVIATED};
