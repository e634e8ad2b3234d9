//! In-memory vector store using exhaustive cosine similarity search.
//!
//! This module provides [`InMemoryVectorStore`], an append-only store backed
//! by a `Vec` protected by a `tokio::sync::RwLock`. Every query scans all
//! records (O(N·D)); that is the deliberate scale ceiling of this design,
//! and larger corpora belong behind an indexed [`VectorStore`] implementation.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{Chunk, Record, ScoredResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// An append-only in-memory vector store with exhaustive cosine search.
///
/// The store owns its embedding provider: `add_records` embeds chunk texts
/// before taking the write lock, so slow network calls never block readers.
/// Records are kept in insertion order; the first write establishes the
/// store's embedding dimensionality and every later write must match it.
pub struct InMemoryVectorStore {
    embedder: Arc<dyn EmbeddingProvider>,
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    records: Vec<Record>,
    /// Established embedding dimensionality; `None` until the first write.
    dimensions: Option<usize>,
}

impl InMemoryVectorStore {
    /// Create a new empty store backed by the given embedding provider.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder, inner: RwLock::new(StoreInner::default()) }
    }

    /// Number of persisted records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_records(&self, chunks: &[Chunk]) -> Result<Vec<String>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        // Embed before taking the write lock; the lock only covers the
        // validate-and-append step.
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::Embedding {
                provider: "batch".to_string(),
                message: format!(
                    "provider returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunks.len()
                ),
            });
        }

        let mut inner = self.inner.write().await;

        // Validate every embedding before appending anything, so a partial
        // batch is never persisted.
        let expected = inner.dimensions.unwrap_or(embeddings[0].len());
        for embedding in &embeddings {
            if embedding.len() != expected {
                return Err(RagError::DimensionMismatch { expected, actual: embedding.len() });
            }
        }
        inner.dimensions = Some(expected);

        let mut ids = Vec::with_capacity(chunks.len());
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            let id = Uuid::new_v4().to_string();
            ids.push(id.clone());
            inner.records.push(Record {
                id,
                content: chunk.text.clone(),
                embedding,
                metadata: chunk.metadata.clone(),
            });
        }

        Ok(ids)
    }

    async fn all_records(&self) -> Vec<Record> {
        self.inner.read().await.records.clone()
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredResult>> {
        let inner = self.inner.read().await;

        if let Some(expected) = inner.dimensions {
            if embedding.len() != expected {
                return Err(RagError::DimensionMismatch { expected, actual: embedding.len() });
            }
        }

        let mut scored: Vec<ScoredResult> = inner
            .records
            .iter()
            .map(|record| ScoredResult {
                content: record.content.clone(),
                metadata: record.metadata.clone(),
                similarity: cosine_similarity(embedding, &record.embedding),
            })
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| {
            b.similarity.partial_cmp(&a.similarity).unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }
}
