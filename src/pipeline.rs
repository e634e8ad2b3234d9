//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full ingest-and-answer workflow by
//! composing a [`Chunker`], an [`EmbeddingProvider`], a [`VectorStore`],
//! and a [`CompletionProvider`].
//!
//! # Example
//!
//! ```rust,ignore
//! use docrag::{DocumentSource, InMemoryVectorStore, RagConfig, RagPipeline, RecursiveChunker};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .chunker(Arc::new(RecursiveChunker::new(800, 100)))
//!     .embedding_provider(embedder.clone())
//!     .vector_store(Arc::new(InMemoryVectorStore::new(embedder)))
//!     .completion_provider(Arc::new(my_model))
//!     .build()?;
//!
//! pipeline.ingest(&text, DocumentSource::Text).await?;
//! let answer = pipeline.answer("What does the document say?").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::completion::CompletionProvider;
use crate::config::RagConfig;
use crate::document::{DocumentSource, ScoredResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::prompt::{assemble_context, build_prompt};
use crate::retriever::Retriever;
use crate::vectorstore::VectorStore;

/// The RAG pipeline orchestrator.
///
/// The ingestion path is chunk → embed → store; the query path is
/// embed → rank → assemble context → complete. Construct one via
/// [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    chunker: Arc<dyn Chunker>,
    vector_store: Arc<dyn VectorStore>,
    completion_provider: Arc<dyn CompletionProvider>,
    retriever: Retriever,
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline").field("config", &self.config).finish_non_exhaustive()
    }
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Ingest a document: chunk the text and persist one embedded record
    /// per chunk, tagged with the document's source.
    ///
    /// `content` must already be normalized plain text — URL fetching, HTML
    /// cleanup, and PDF extraction happen upstream. Returns the ids of the
    /// records that were persisted.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyContent`] if the text is empty after
    /// trimming, and propagates embedding and store failures.
    pub async fn ingest(&self, content: &str, source: DocumentSource) -> Result<Vec<String>> {
        let source_tag = source.tag();
        let base_metadata =
            HashMap::from([("source".to_string(), source_tag.clone())]);

        let chunks = self.chunker.split(content, &base_metadata);
        if chunks.is_empty() {
            error!(source = %source_tag, "ingest called with no usable text");
            return Err(RagError::EmptyContent);
        }

        let ids = self.vector_store.add_records(&chunks).await.map_err(|e| {
            error!(source = %source_tag, error = %e, "ingestion failed");
            e
        })?;

        info!(source = %source_tag, chunk_count = ids.len(), "ingested document");
        Ok(ids)
    }

    /// Retrieve the `k` most relevant stored chunks for `question`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if `k == 0`, and propagates
    /// embedding and store failures.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<ScoredResult>> {
        self.retriever.retrieve(question, k).await
    }

    /// Answer a question from ingested documents.
    ///
    /// Retrieves the configured `top_k` most relevant chunks, assembles the
    /// grounding context, and delegates to the completion provider. The
    /// provider's output is returned verbatim. An empty store is not an
    /// error: the context block is empty and the prompt instruction steers
    /// the model to an "insufficient information" answer.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidArgument`] if the question is empty after
    /// trimming, and propagates embedding, store, and completion failures.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(RagError::InvalidArgument("question must not be empty".to_string()));
        }

        let results = self.retriever.retrieve(question, self.config.top_k).await.map_err(|e| {
            error!(error = %e, "retrieval failed during answer");
            e
        })?;

        let context = assemble_context(&results, self.config.max_context_chars);
        let prompt = build_prompt(&context, question);

        let answer = self.completion_provider.complete(&prompt).await.map_err(|e| {
            error!(error = %e, "completion failed during answer");
            e
        })?;

        info!(
            retrieved = results.len(),
            context_chars = context.chars().count(),
            "answered question"
        );
        Ok(answer)
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields are required. Call [`build()`](RagPipelineBuilder::build) to
/// validate and produce the pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    chunker: Option<Arc<dyn Chunker>>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    completion_provider: Option<Arc<dyn CompletionProvider>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the embedding provider used for query embedding.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the completion provider that generates answers.
    pub fn completion_provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.completion_provider = Some(provider);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::Config("chunker is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::Config("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::Config("vector_store is required".to_string()))?;
        let completion_provider = self
            .completion_provider
            .ok_or_else(|| RagError::Config("completion_provider is required".to_string()))?;

        let retriever = Retriever::new(embedding_provider, Arc::clone(&vector_store));

        Ok(RagPipeline { config, chunker, vector_store, completion_provider, retriever })
    }
}
