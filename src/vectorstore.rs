//! Vector store trait for persisting embedded chunks and similarity search.

use async_trait::async_trait;

use crate::document::{Chunk, Record, ScoredResult};
use crate::error::Result;

/// A storage backend for embedded chunks with similarity search.
///
/// The store is append-only: records are created on ingestion, never
/// updated or deleted, and kept in insertion order. A swap to an indexed
/// backend (e.g. approximate nearest neighbor) goes behind this trait so
/// retrieval semantics (ranking, tie-break, `top_k` bounding) stay unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new(embedder);
/// let ids = store.add_records(&chunks).await?;
/// let results = store.search(&query_embedding, 4).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Embed all chunk texts and append one record per chunk, in input
    /// order, each with a fresh unique id. Returns the assigned ids.
    ///
    /// The call is atomic: either every chunk is persisted or none is.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Embedding`](crate::RagError::Embedding) if the
    /// embedding call fails, or
    /// [`RagError::DimensionMismatch`](crate::RagError::DimensionMismatch)
    /// if any embedding's length differs from the store's established
    /// dimensionality. The first write establishes it.
    async fn add_records(&self, chunks: &[Chunk]) -> Result<Vec<String>>;

    /// Return every persisted record, in insertion order.
    async fn all_records(&self) -> Vec<Record>;

    /// Return the `top_k` records most similar to `embedding`, ordered by
    /// descending cosine similarity with ties broken by insertion order.
    ///
    /// An empty store yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`](crate::RagError::DimensionMismatch)
    /// if the query vector's length differs from the store's established
    /// dimensionality.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredResult>>;
}
