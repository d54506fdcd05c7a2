//! Pinecone-backed agent memory.
//!
//! Provides [`PineconeMemory`] (the [`memory_core::Memory`] implementation), the
//! [`VectorStore`]/[`VectorIndex`] seam it talks through, and [`PineconeClient`], the REST
//! implementation of that seam.
//! External: Pinecone controller and index hosts (HTTPS), an `EmbeddingService`.

mod client;
mod config;
mod index;
mod index_spec;
mod store;

pub use client::{PineconeClient, PineconeIndex};
pub use config::{PineconeConfig, WriteVerification};
pub use index::{DeleteTarget, ScoredVector, Vector, VectorIndex, VectorStore, RAW_TEXT_KEY};
pub use index_spec::{IndexSpec, Metric, PodType};
pub use store::PineconeMemory;
