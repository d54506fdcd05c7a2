//! # Simple Memory
//!
//! In-process implementation of the [`Memory`] trait backed by an ordered list.
//!
//! **Behavior**:
//! - Snippets are kept in insertion order and addressed by position.
//! - Deleting shifts every later snippet one position left, so indices obtained before a
//!   delete may point at a different snippet (or nothing) afterwards.
//! - Relevance ranking is a no-op: `get_relevant` returns everything.
//!
//! **Limitations**:
//! - Data is lost on restart
//! - No semantic search
//!
//! ## Example
//!
//! ```rust
//! use memory_inmemory::SimpleMemory;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let memory = SimpleMemory::new();
//!     memory.add("a").await;
//!     memory.add("b").await;
//!     assert_eq!(memory.get_relevant(None).await, vec!["a", "b"]);
//!
//!     memory.delete(0).await;
//!     assert_eq!(memory.get(0).await.unwrap(), "b");
//! }
//! ```

use async_trait::async_trait;
use memory_core::{BackendKind, Memory, MemoryError, MemoryStats, OBLIVIATED};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Ordered in-process list memory.
#[derive(Debug, Default)]
pub struct SimpleMemory {
    entries: RwLock<Vec<String>>,
}

impl SimpleMemory {
    /// Creates a new empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text`. Never fails.
    pub async fn add(&self, text: &str) -> String {
        let mut entries = self.entries.write().await;
        entries.push(text.to_string());
        debug!(len = entries.len(), "SimpleMemory: committed entry");
        format!("Committing memory with string \"{}\" ", text)
    }

    /// Returns the snippet at `index`.
    pub async fn get(&self, index: usize) -> Result<String, MemoryError> {
        let entries = self.entries.read().await;
        entries
            .get(index)
            .cloned()
            .ok_or(MemoryError::IndexOutOfRange {
                index,
                len: entries.len(),
            })
    }

    /// Removes the snippet at `index`; later snippets shift left.
    ///
    /// Returns `None` (and logs) when `index` is out of range; the list is left unchanged.
    pub async fn delete(&self, index: usize) -> Option<String> {
        let mut entries = self.entries.write().await;
        if index >= entries.len() {
            warn!(index, len = entries.len(), "Invalid key, cannot delete memory.");
            return None;
        }
        entries.remove(index);
        let text = format!("Deleting memory with key {}", index);
        info!("{}", text);
        Some(text)
    }

    /// Replaces the snippet at `index` with `text`.
    ///
    /// Same bounds contract as [`SimpleMemory::delete`].
    pub async fn overwrite(&self, index: usize, text: &str) -> Option<String> {
        let mut entries = self.entries.write().await;
        let Some(slot) = entries.get_mut(index) else {
            warn!(index, "Invalid key, cannot overwrite memory.");
            return None;
        };
        *slot = text.to_string();
        let confirmation = format!("Overwriting memory with key {} and string {}", index, text);
        info!("{}", confirmation);
        Some(confirmation)
    }

    /// Empties the list.
    pub async fn clear(&self) -> String {
        self.entries.write().await.clear();
        OBLIVIATED.to_string()
    }

    /// Returns every stored snippet in insertion order; `query` is ignored.
    pub async fn get_relevant(&self, _query: Option<&str>) -> Vec<String> {
        self.entries.read().await.clone()
    }

    /// Number of snippets and their total length in characters.
    pub async fn get_stats(&self) -> MemoryStats {
        let entries = self.entries.read().await;
        MemoryStats::Simple {
            size: entries.len(),
            total_chars: entries.iter().map(|e| e.chars().count()).sum(),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Memory for SimpleMemory {
    fn backend(&self) -> BackendKind {
        BackendKind::Simple
    }

    async fn add(&self, text: &str) -> Result<String, MemoryError> {
        Ok(SimpleMemory::add(self, text).await)
    }

    async fn clear(&self) -> Result<String, MemoryError> {
        Ok(SimpleMemory::clear(self).await)
    }

    /// Ignores both `query` and `num_relevant`.
    async fn get_relevant(
        &self,
        query: &str,
        _num_relevant: usize,
    ) -> Result<Vec<String>, MemoryError> {
        Ok(SimpleMemory::get_relevant(self, Some(query)).await)
    }

    async fn get_stats(&self) -> Result<MemoryStats, MemoryError> {
        Ok(SimpleMemory::get_stats(self).await)
    }
}
