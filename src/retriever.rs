//! Query-time retrieval: embed the query, rank stored records.

use std::sync::Arc;

use tracing::debug;

use crate::document::ScoredResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Retrieves the most relevant stored records for a natural-language query.
///
/// Holds no state between calls; each query is a point-in-time read of the
/// store. Retrieval is brute force: every record is scored against the
/// query embedding.
pub struct Retriever {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
}

impl Retriever {
    /// Create a new retriever over the given provider and store.
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self { embedding_provider, vector_store }
    }

    /// Return the `k` stored records most similar to `query`, ordered by
    /// descending cosine similarity. Returns `min(k, record count)` results;
    /// an empty store yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if `k == 0`, or propagates
    /// embedding and store failures.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredResult>> {
        if k == 0 {
            return Err(RagError::InvalidArgument("k must be greater than zero".to_string()));
        }

        let query_embedding = self.embedding_provider.embed(query).await?;
        let results = self.vector_store.search(&query_embedding, k).await?;

        debug!(k, result_count = results.len(), "retrieved records");
        Ok(results)
    }
}
