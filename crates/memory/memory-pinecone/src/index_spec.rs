//! Parameters used when the memory index has to be created.

use embedding::DEFAULT_EMBEDDING_DIM;
use serde::Serialize;

/// Similarity metric of a Pinecone index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Cosine similarity (recommended for normalized embeddings)
    Cosine,
    Euclidean,
    Dotproduct,
}

/// Pod resource tier of a Pinecone index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PodType {
    #[serde(rename = "s1")]
    S1,
    #[serde(rename = "p1")]
    P1,
    #[serde(rename = "p2")]
    P2,
}

/// Body of the create-index request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSpec {
    pub name: String,
    pub dimension: usize,
    pub metric: Metric,
    pub pod_type: PodType,
}

impl IndexSpec {
    /// Agent memory defaults: 1536 dimensions, cosine, `p1` pods.
    pub fn default_for(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension: DEFAULT_EMBEDDING_DIM,
            metric: Metric::Cosine,
            pod_type: PodType::P1,
        }
    }
}
