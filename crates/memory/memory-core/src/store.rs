//! # Memory Trait
//!
//! The operations every agent memory backend supports.
//!
//! ### Required Methods
//!
//! - `add(text)`: store a snippet, returning a human-readable confirmation.
//! - `clear()`: drop everything, returning [`crate::OBLIVIATED`].
//! - `get_relevant(query, num_relevant)`: snippets most relevant to `query`, best first.
//!   The simple backend ignores both arguments and returns everything it holds.
//! - `get_stats()`: backend statistics.
//!
//! Handles are shared (`Arc`) but a memory is meant to have a single logical owner per
//! process; interleaving writers from several tasks is not coordinated beyond the
//! per-operation locking each backend needs to stay sound.

use async_trait::async_trait;

use crate::error::MemoryError;
use crate::types::{BackendKind, MemoryStats};

/// Number of results `get_relevant` returns when the caller has no preference.
pub const DEFAULT_NUM_RELEVANT: usize = 5;

/// Trait implemented by every agent memory backend.
#[async_trait]
pub trait Memory: Send + Sync {
    /// Which backend this is.
    fn backend(&self) -> BackendKind;

    /// Stores `text` and returns a confirmation message.
    async fn add(&self, text: &str) -> Result<String, MemoryError>;

    /// Removes every stored snippet.
    async fn clear(&self) -> Result<String, MemoryError>;

    /// Returns up to `num_relevant` stored snippets ordered by relevance to `query`.
    async fn get_relevant(
        &self,
        query: &str,
        num_relevant: usize,
    ) -> Result<Vec<String>, MemoryError>;

    /// Returns backend statistics.
    async fn get_stats(&self) -> Result<MemoryStats, MemoryError>;
}
