//! Pinecone-backed implementation of the [`Memory`] trait.
//!
//! Records are keyed by a per-process insertion counter (`"0"`, `"1"`, ...) and carry their
//! original text as `raw_text` metadata. The counter starts at 0 for every new handle: an
//! index that already holds records from an earlier process will have them overwritten as
//! the counter catches up.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use embedding::EmbeddingService;
use memory_core::{
    BackendKind, IndexStats, Memory, MemoryError, MemoryRecord, MemoryStats, OBLIVIATED,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::config::{PineconeConfig, WriteVerification};
use crate::index::{raw_text_metadata, DeleteTarget, Vector, VectorIndex, VectorStore};
use crate::index_spec::IndexSpec;

/// Agent memory stored in a Pinecone index.
pub struct PineconeMemory {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingService>,
    index_name: String,
    namespace: String,
    write_verification: WriteVerification,
    /// Next record id. Held across the upsert so an id is handed out exactly once.
    vec_num: Mutex<u64>,
}

impl PineconeMemory {
    /// Connects to the index named in `config`, creating it first when it does not exist.
    ///
    /// Creation uses [`IndexSpec::default_for`] (1536 dimensions, cosine, `p1`).
    #[instrument(skip_all, fields(index = %config.index_name, namespace = %config.namespace))]
    pub async fn connect(
        store: &dyn VectorStore,
        embedder: Arc<dyn EmbeddingService>,
        config: &PineconeConfig,
    ) -> Result<Self> {
        let existing = store.list_indexes().await?;
        if existing.iter().any(|name| name == &config.index_name) {
            debug!("pinecone index already exists");
        } else {
            info!("step: pinecone index missing, creating");
            store
                .create_index(&IndexSpec::default_for(config.index_name.as_str()))
                .await?;
        }
        let index = store.index(&config.index_name).await?;
        Ok(Self::with_index(index, embedder, config))
    }

    /// Wraps an already-open index handle.
    pub fn with_index(
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingService>,
        config: &PineconeConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            index_name: config.index_name.clone(),
            namespace: config.namespace.clone(),
            write_verification: config.write_verification,
            vec_num: Mutex::new(0),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn write_verification(&self) -> WriteVerification {
        self.write_verification
    }

    /// Id the next `add` will use.
    pub async fn vec_num(&self) -> u64 {
        *self.vec_num.lock().await
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        self.embedder.embed(text).await.map_err(MemoryError::Embedding)
    }

    /// In strict mode, fails with `UnknownIds` unless every id is in the index.
    async fn verify_ids(&self, ids: &[String]) -> Result<(), MemoryError> {
        if self.write_verification == WriteVerification::Lenient {
            return Ok(());
        }
        let found = self
            .index
            .fetch(&self.namespace, ids)
            .await
            .map_err(MemoryError::Remote)?;
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !found.iter().any(|v| &v.id == *id))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MemoryError::UnknownIds(missing))
        }
    }

    /// Embeds `text` and upserts it under the next counter value.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn add(&self, text: &str) -> Result<String, MemoryError> {
        let vector = self.embed(text).await?;
        let mut vec_num = self.vec_num.lock().await;
        let record = MemoryRecord::new((*vec_num).to_string(), text, vector);
        self.index
            .upsert(&self.namespace, vec![Vector::from(record)])
            .await
            .map_err(MemoryError::Remote)?;
        let confirmation = format!(
            "Inserting data into memory at index: {}:\n data: {}",
            *vec_num, text
        );
        *vec_num += 1;
        debug!(next_id = *vec_num, "pinecone memory add done");
        Ok(confirmation)
    }

    /// The single most relevant snippet for `text`.
    pub async fn get(&self, text: &str) -> Result<Vec<String>, MemoryError> {
        self.get_relevant(text, 1).await
    }

    /// Removes `ids` from the index.
    ///
    /// In lenient mode the confirmation is returned whether or not the ids existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, ids: &[String]) -> Result<String, MemoryError> {
        self.verify_ids(ids).await?;
        self.index
            .delete(&self.namespace, DeleteTarget::Ids(ids.to_vec()))
            .await
            .map_err(MemoryError::Remote)?;
        Ok(format!("Deleting data from memory at index: {:?}", ids))
    }

    /// Re-embeds `text` and replaces the vector stored under `vector_id`.
    ///
    /// `index` only appears in the confirmation. The `raw_text` metadata is replaced too so
    /// later queries return the new text.
    #[instrument(skip(self, text))]
    pub async fn overwrite(
        &self,
        index: usize,
        vector_id: &str,
        text: &str,
    ) -> Result<String, MemoryError> {
        self.verify_ids(&[vector_id.to_string()]).await?;
        let vector = self.embed(text).await?;
        self.index
            .update(&self.namespace, vector_id, vector, Some(raw_text_metadata(text)))
            .await
            .map_err(MemoryError::Remote)?;
        Ok(format!(
            "Overwriting data in memory at index: {} with data:\n {}",
            index, text
        ))
    }

    /// Deletes every record in the namespace.
    pub async fn clear(&self) -> Result<String, MemoryError> {
        self.index
            .delete(&self.namespace, DeleteTarget::All)
            .await
            .map_err(MemoryError::Remote)?;
        info!(namespace = %self.namespace, "pinecone memory cleared");
        Ok(OBLIVIATED.to_string())
    }

    /// Raw texts of the `num_relevant` records nearest to `query`, highest score first.
    ///
    /// Matches are re-sorted by score (stable, so ties keep the order the index returned);
    /// matches without `raw_text` metadata are skipped.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn get_relevant(
        &self,
        query: &str,
        num_relevant: usize,
    ) -> Result<Vec<String>, MemoryError> {
        let query_embedding = self.embed(query).await?;
        let mut matches = self
            .index
            .query(&self.namespace, query_embedding, num_relevant, true)
            .await
            .map_err(MemoryError::Remote)?;
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(matches = matches.len(), "pinecone memory get_relevant");
        Ok(matches
            .iter()
            .filter_map(|m| m.raw_text().map(str::to_string))
            .collect())
    }

    /// Index statistics, passed through.
    pub async fn get_stats(&self) -> Result<MemoryStats, MemoryError> {
        let stats = self
            .index
            .describe_index_stats()
            .await
            .map_err(MemoryError::Remote)?;
        Ok(MemoryStats::Index {
            stats: IndexStats(stats),
        })
    }
}

#[async_trait]
impl Memory for PineconeMemory {
    fn backend(&self) -> BackendKind {
        BackendKind::Vector
    }

    async fn add(&self, text: &str) -> Result<String, MemoryError> {
        PineconeMemory::add(self, text).await
    }

    async fn clear(&self) -> Result<String, MemoryError> {
        PineconeMemory::clear(self).await
    }

    async fn get_relevant(
        &self,
        query: &str,
        num_relevant: usize,
    ) -> Result<Vec<String>, MemoryError> {
        PineconeMemory::get_relevant(self, query, num_relevant).await
    }

    async fn get_stats(&self) -> Result<MemoryStats, MemoryError> {
        PineconeMemory::get_stats(self).await
    }
}

impl std::fmt::Debug for PineconeMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeMemory")
            .field("index_name", &self.index_name)
            .field("namespace", &self.namespace)
            .field("write_verification", &self.write_verification)
            .finish_non_exhaustive()
    }
}
