//! Vector store seam: control plane ([`VectorStore`]) and data plane ([`VectorIndex`]).
//!
//! [`crate::PineconeClient`] implements both over HTTP; tests substitute in-process fakes.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use memory_core::MemoryRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::index_spec::IndexSpec;

/// Metadata key holding the original text of a record.
pub const RAW_TEXT_KEY: &str = "raw_text";

/// A vector as written to or fetched from the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub id: String,
    pub values: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Vector {
    /// Builds a vector carrying `{raw_text: text}` as metadata.
    pub fn with_raw_text(id: impl Into<String>, values: Vec<f32>, text: &str) -> Self {
        Self {
            id: id.into(),
            values,
            metadata: Some(raw_text_metadata(text)),
        }
    }
}

impl From<MemoryRecord> for Vector {
    fn from(record: MemoryRecord) -> Self {
        Vector::with_raw_text(record.id, record.vector, &record.text)
    }
}

/// One query match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVector {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl ScoredVector {
    /// The `raw_text` metadata field, if present and a string.
    pub fn raw_text(&self) -> Option<&str> {
        self.metadata.as_ref()?.get(RAW_TEXT_KEY)?.as_str()
    }
}

/// What a delete request removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Ids(Vec<String>),
    /// Every vector in the namespace.
    All,
}

/// `{raw_text: text}` metadata object.
pub fn raw_text_metadata(text: &str) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(RAW_TEXT_KEY.to_string(), Value::String(text.to_string()));
    metadata
}

/// Data-plane operations on one index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Inserts or replaces vectors; returns the upserted count.
    async fn upsert(&self, namespace: &str, vectors: Vec<Vector>) -> Result<u64>;

    /// Returns the `top_k` nearest neighbors of `vector`.
    async fn query(
        &self,
        namespace: &str,
        vector: Vec<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<ScoredVector>>;

    /// Returns the vectors among `ids` that exist.
    async fn fetch(&self, namespace: &str, ids: &[String]) -> Result<Vec<Vector>>;

    async fn delete(&self, namespace: &str, target: DeleteTarget) -> Result<()>;

    /// Replaces the values of `id`, optionally merging `set_metadata` into its metadata.
    async fn update(
        &self,
        namespace: &str,
        id: &str,
        values: Vec<f32>,
        set_metadata: Option<Map<String, Value>>,
    ) -> Result<()>;

    /// Index statistics object, passed through untouched.
    async fn describe_index_stats(&self) -> Result<Value>;
}

/// Control-plane operations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn list_indexes(&self) -> Result<Vec<String>>;

    async fn create_index(&self, spec: &IndexSpec) -> Result<()>;

    /// Handle to an existing index.
    async fn index(&self, name: &str) -> Result<Arc<dyn VectorIndex>>;
}
