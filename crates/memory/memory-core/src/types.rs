//! # Core Types
//!
//! ## MemoryRecord
//!
//! One stored snippet: id, raw text and its embedding. The vector backend uses the stringified
//! insertion counter as id.
//!
//! ## MemoryStats
//!
//! Backend statistics. The simple backend reports its size and character count; the vector
//! backend passes the index's own statistics object through untouched.

use serde::{Deserialize, Serialize};

/// Confirmation returned by every `clear`.
pub const OBLIVIATED: &str = "Obliviated";

/// Which backend a memory handle is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Simple,
    Vector,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Simple => f.write_str("simple"),
            BackendKind::Vector => f.write_str("vector"),
        }
    }
}

/// A single stored snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub text: String,
    pub vector: Vec<f32>,
}

impl MemoryRecord {
    pub fn new(id: impl Into<String>, text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            vector,
        }
    }
}

/// Index statistics as returned by the vector store (opaque JSON object).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexStats(pub serde_json::Value);

impl IndexStats {
    /// `totalVectorCount` field, when the store reports one.
    pub fn total_vector_count(&self) -> Option<u64> {
        self.0.get("totalVectorCount").and_then(|v| v.as_u64())
    }

    /// Vector count of one namespace, when the store reports one.
    pub fn namespace_vector_count(&self, namespace: &str) -> Option<u64> {
        self.0
            .get("namespaces")?
            .get(namespace)?
            .get("vectorCount")?
            .as_u64()
    }
}

/// Statistics reported by a memory backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum MemoryStats {
    Simple { size: usize, total_chars: usize },
    Index { stats: IndexStats },
}
