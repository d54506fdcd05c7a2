//! Shared test utilities for memory-pinecone integration tests.
//!
//! Provides MockEmbeddingService (EmbeddingService), FakeIndex (VectorIndex) and
//! FakeStore (VectorStore) so PineconeMemory can be exercised without network access.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use embedding::EmbeddingService;
use memory_pinecone::{
    DeleteTarget, IndexSpec, ScoredVector, Vector, VectorIndex, VectorStore,
};
use serde_json::{json, Map, Value};

/// Mock embedding service: returns a 1536-dim vector whose first element is the text length.
/// Can be switched to fail every call.
#[derive(Default)]
pub struct MockEmbeddingService {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl MockEmbeddingService {
    pub fn failing() -> Self {
        let service = Self::default();
        service.fail.store(true, Ordering::SeqCst);
        service
    }
}

#[async_trait]
impl EmbeddingService for MockEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("embedding service unavailable"));
        }
        let mut vector = vec![0.0; 1536];
        vector[0] = text.len() as f32;
        Ok(vector)
    }
}

/// Request recorded by FakeIndex.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexCall {
    Upsert { namespace: String, ids: Vec<String> },
    Query { namespace: String, top_k: usize, include_metadata: bool },
    Fetch { ids: Vec<String> },
    Delete { namespace: String, target: DeleteTarget },
    Update { id: String, set_metadata: Option<Map<String, Value>> },
    DescribeStats,
}

/// In-process VectorIndex. Stores upserted vectors; `query` returns `scripted_matches`.
#[derive(Default)]
pub struct FakeIndex {
    pub vectors: Mutex<BTreeMap<String, Vector>>,
    pub calls: Mutex<Vec<IndexCall>>,
    pub scripted_matches: Mutex<Vec<ScoredVector>>,
    pub fail_upsert: AtomicBool,
}

impl FakeIndex {
    pub fn with_matches(matches: Vec<ScoredVector>) -> Self {
        let index = Self::default();
        *index.scripted_matches.lock().unwrap() = matches;
        index
    }

    pub fn calls(&self) -> Vec<IndexCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: IndexCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Query match with `raw_text` metadata.
pub fn scored(id: &str, score: f32, text: &str) -> ScoredVector {
    serde_json::from_value(json!({
        "id": id,
        "score": score,
        "metadata": { "raw_text": text }
    }))
    .unwrap()
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn upsert(&self, namespace: &str, vectors: Vec<Vector>) -> Result<u64> {
        if self.fail_upsert.load(Ordering::SeqCst) {
            return Err(anyhow!("Pinecone API error on upsert (503): unavailable"));
        }
        self.record(IndexCall::Upsert {
            namespace: namespace.to_string(),
            ids: vectors.iter().map(|v| v.id.clone()).collect(),
        });
        let count = vectors.len() as u64;
        let mut stored = self.vectors.lock().unwrap();
        for vector in vectors {
            stored.insert(vector.id.clone(), vector);
        }
        Ok(count)
    }

    async fn query(
        &self,
        namespace: &str,
        _vector: Vec<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<ScoredVector>> {
        self.record(IndexCall::Query {
            namespace: namespace.to_string(),
            top_k,
            include_metadata,
        });
        Ok(self.scripted_matches.lock().unwrap().clone())
    }

    async fn fetch(&self, _namespace: &str, ids: &[String]) -> Result<Vec<Vector>> {
        self.record(IndexCall::Fetch { ids: ids.to_vec() });
        let stored = self.vectors.lock().unwrap();
        Ok(ids.iter().filter_map(|id| stored.get(id).cloned()).collect())
    }

    async fn delete(&self, namespace: &str, target: DeleteTarget) -> Result<()> {
        self.record(IndexCall::Delete {
            namespace: namespace.to_string(),
            target: target.clone(),
        });
        let mut stored = self.vectors.lock().unwrap();
        match target {
            DeleteTarget::Ids(ids) => {
                for id in ids {
                    stored.remove(&id);
                }
            }
            DeleteTarget::All => stored.clear(),
        }
        Ok(())
    }

    async fn update(
        &self,
        _namespace: &str,
        id: &str,
        values: Vec<f32>,
        set_metadata: Option<Map<String, Value>>,
    ) -> Result<()> {
        self.record(IndexCall::Update {
            id: id.to_string(),
            set_metadata: set_metadata.clone(),
        });
        let mut stored = self.vectors.lock().unwrap();
        if let Some(vector) = stored.get_mut(id) {
            vector.values = values;
            if let Some(metadata) = set_metadata {
                vector.metadata.get_or_insert_with(Map::new).extend(metadata);
            }
        }
        Ok(())
    }

    async fn describe_index_stats(&self) -> Result<Value> {
        self.record(IndexCall::DescribeStats);
        let count = self.vectors.lock().unwrap().len();
        Ok(json!({ "dimension": 1536, "totalVectorCount": count }))
    }
}

/// In-process VectorStore holding one FakeIndex.
pub struct FakeStore {
    pub existing: Mutex<Vec<String>>,
    pub created: Mutex<Vec<IndexSpec>>,
    pub index: Arc<FakeIndex>,
    pub fail_list: AtomicBool,
}

impl FakeStore {
    pub fn new(existing: &[&str]) -> Self {
        Self {
            existing: Mutex::new(existing.iter().map(|s| s.to_string()).collect()),
            created: Mutex::new(Vec::new()),
            index: Arc::new(FakeIndex::default()),
            fail_list: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl VectorStore for FakeStore {
    async fn list_indexes(&self) -> Result<Vec<String>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(anyhow!("Pinecone API error on list_indexes (401): unauthorized"));
        }
        Ok(self.existing.lock().unwrap().clone())
    }

    async fn create_index(&self, spec: &IndexSpec) -> Result<()> {
        self.created.lock().unwrap().push(spec.clone());
        self.existing.lock().unwrap().push(spec.name.clone());
        Ok(())
    }

    async fn index(&self, name: &str) -> Result<Arc<dyn VectorIndex>> {
        if !self.existing.lock().unwrap().iter().any(|n| n == name) {
            return Err(anyhow!("index {} not found", name));
        }
        Ok(self.index.clone())
    }
}
