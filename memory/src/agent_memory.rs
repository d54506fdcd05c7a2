//! # Agent Memory Handle
//!
//! [`AgentMemory`] is what the factory hands out: one of the two backends behind a shared
//! handle. The common operations go through the [`Memory`] trait; backend-specific ones
//! (index-based `get`/`delete`/`overwrite` on the list, id-based ones on the vector index)
//! are reached with [`AgentMemory::as_simple`] / [`AgentMemory::as_vector`].

use std::sync::Arc;

use async_trait::async_trait;
use memory_core::{BackendKind, Memory, MemoryError, MemoryStats};
use memory_inmemory::SimpleMemory;
use memory_pinecone::PineconeMemory;

/// A memory backend chosen at runtime. Cloning shares the underlying store.
#[derive(Debug, Clone)]
pub enum AgentMemory {
    Simple(Arc<SimpleMemory>),
    Vector(Arc<PineconeMemory>),
}

impl AgentMemory {
    /// Fresh, empty in-process memory.
    pub fn simple() -> Self {
        AgentMemory::Simple(Arc::new(SimpleMemory::new()))
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            AgentMemory::Simple(_) => BackendKind::Simple,
            AgentMemory::Vector(_) => BackendKind::Vector,
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleMemory> {
        match self {
            AgentMemory::Simple(memory) => Some(memory),
            AgentMemory::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&PineconeMemory> {
        match self {
            AgentMemory::Vector(memory) => Some(memory),
            AgentMemory::Simple(_) => None,
        }
    }

    /// True when both handles point at the same store.
    pub fn same_handle(&self, other: &AgentMemory) -> bool {
        match (self, other) {
            (AgentMemory::Simple(a), AgentMemory::Simple(b)) => Arc::ptr_eq(a, b),
            (AgentMemory::Vector(a), AgentMemory::Vector(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn inner(&self) -> &dyn Memory {
        match self {
            AgentMemory::Simple(memory) => memory.as_ref(),
            AgentMemory::Vector(memory) => memory.as_ref(),
        }
    }
}

impl From<SimpleMemory> for AgentMemory {
    fn from(memory: SimpleMemory) -> Self {
        AgentMemory::Simple(Arc::new(memory))
    }
}

impl From<PineconeMemory> for AgentMemory {
    fn from(memory: PineconeMemory) -> Self {
        AgentMemory::Vector(Arc::new(memory))
    }
}

#[async_trait]
impl Memory for AgentMemory {
    fn backend(&self) -> BackendKind {
        self.kind()
    }

    async fn add(&self, text: &str) -> Result<String, MemoryError> {
        self.inner().add(text).await
    }

    async fn clear(&self) -> Result<String, MemoryError> {
        self.inner().clear().await
    }

    async fn get_relevant(
        &self,
        query: &str,
        num_relevant: usize,
    ) -> Result<Vec<String>, MemoryError> {
        self.inner().get_relevant(query, num_relevant).await
    }

    async fn get_stats(&self) -> Result<MemoryStats, MemoryError> {
        self.inner().get_stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_handle_shares_state_across_clones() {
        let memory = AgentMemory::simple();
        let clone = memory.clone();
        assert!(memory.same_handle(&clone));
        assert_eq!(memory.kind(), BackendKind::Simple);

        clone.add("shared").await.unwrap();
        assert_eq!(memory.as_simple().unwrap().len().await, 1);
        assert!(memory.as_vector().is_none());
    }

    #[test]
    fn test_distinct_simple_memories_are_not_same_handle() {
        assert!(!AgentMemory::simple().same_handle(&AgentMemory::simple()));
    }
}
