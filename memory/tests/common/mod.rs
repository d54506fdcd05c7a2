//! Shared test utilities for the memory crate's integration tests.
//!
//! MockConnector hands out an in-process VectorStore and a MockEmbeddingService, and can be
//! told to fail at build, connect or probe time.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use embedding::EmbeddingService;
use memory::{MemoryConfig, VectorBackend, VectorBackendConnector};
use memory_pinecone::{DeleteTarget, IndexSpec, ScoredVector, Vector, VectorIndex, VectorStore};
use serde_json::{json, Map, Value};
use tokio::sync::Notify;

/// Config with every vector-backend credential set.
pub fn configured() -> MemoryConfig {
    let mut config = MemoryConfig::default();
    config.pinecone_api_key = "pc-test".to_string();
    config.pinecone_region = "test-env".to_string();
    config.embedding.openai_api_key = "sk-test".to_string();
    config
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Returns a 1536-dim vector whose first element is the text length.
#[derive(Default)]
pub struct MockEmbeddingService {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl EmbeddingService for MockEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("invalid_api_key"));
        }
        let mut vector = vec![0.0; 1536];
        vector[0] = text.len() as f32;
        Ok(vector)
    }
}

/// Stores upserted vectors; `query` returns them all with score 1.0.
#[derive(Default)]
pub struct FakeIndex {
    pub vectors: Mutex<BTreeMap<String, Vector>>,
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn upsert(&self, _namespace: &str, vectors: Vec<Vector>) -> Result<u64> {
        let count = vectors.len() as u64;
        let mut stored = self.vectors.lock().unwrap();
        for vector in vectors {
            stored.insert(vector.id.clone(), vector);
        }
        Ok(count)
    }

    async fn query(
        &self,
        _namespace: &str,
        _vector: Vec<f32>,
        top_k: usize,
        _include_metadata: bool,
    ) -> Result<Vec<ScoredVector>> {
        let stored = self.vectors.lock().unwrap();
        Ok(stored
            .values()
            .take(top_k)
            .map(|v| ScoredVector {
                id: v.id.clone(),
                score: 1.0,
                values: Vec::new(),
                metadata: v.metadata.clone(),
            })
            .collect())
    }

    async fn fetch(&self, _namespace: &str, ids: &[String]) -> Result<Vec<Vector>> {
        let stored = self.vectors.lock().unwrap();
        Ok(ids.iter().filter_map(|id| stored.get(id).cloned()).collect())
    }

    async fn delete(&self, _namespace: &str, target: DeleteTarget) -> Result<()> {
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
        let count = self.vectors.lock().unwrap().len();
        Ok(json!({ "dimension": 1536, "totalVectorCount": count }))
    }
}

/// VectorStore with one FakeIndex shared by every index name.
///
/// When `hold_first_list` is set, the first `list_indexes` call waits for it to be notified.
#[derive(Default)]
pub struct FakeStore {
    pub created: Mutex<Vec<String>>,
    pub index: Arc<FakeIndex>,
    pub fail_list: AtomicBool,
    pub hold_first_list: Mutex<Option<Arc<Notify>>>,
}

#[async_trait]
impl VectorStore for FakeStore {
    async fn list_indexes(&self) -> Result<Vec<String>> {
        let hold = self.hold_first_list.lock().unwrap().take();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(anyhow!("Pinecone API error on list_indexes (401): unauthorized"));
        }
        Ok(self.created.lock().unwrap().clone())
    }

    async fn create_index(&self, spec: &IndexSpec) -> Result<()> {
        self.created.lock().unwrap().push(spec.name.clone());
        Ok(())
    }

    async fn index(&self, _name: &str) -> Result<Arc<dyn VectorIndex>> {
        Ok(self.index.clone())
    }
}

/// Where MockConnector should fail, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Nowhere,
    Build,
    Connect,
    Probe,
}

pub struct MockConnector {
    pub builds: AtomicUsize,
    pub store: Arc<FakeStore>,
    pub embedder: Arc<MockEmbeddingService>,
    fail_at: FailAt,
}

impl MockConnector {
    pub fn new(fail_at: FailAt) -> Self {
        let store = Arc::new(FakeStore::default());
        let embedder = Arc::new(MockEmbeddingService::default());
        match fail_at {
            FailAt::Connect => store.fail_list.store(true, Ordering::SeqCst),
            FailAt::Probe => embedder.fail.store(true, Ordering::SeqCst),
            FailAt::Nowhere | FailAt::Build => {}
        }
        Self {
            builds: AtomicUsize::new(0),
            store,
            embedder,
            fail_at,
        }
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl VectorBackendConnector for MockConnector {
    fn build(&self, _config: &MemoryConfig) -> Result<VectorBackend> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == FailAt::Build {
            return Err(anyhow!("Pinecone API key is empty"));
        }
        Ok(VectorBackend {
            store: self.store.clone(),
            embedder: self.embedder.clone(),
        })
    }
}
