//! # docrag
//!
//! Retrieval-augmented question answering over ingested documents.
//!
//! The crate splits normalized document text into overlapping bounded-size
//! chunks, embeds each chunk through an [`EmbeddingProvider`], persists the
//! results in a [`VectorStore`], and answers natural-language questions by
//! ranking stored records against the query embedding and handing the
//! top-ranked texts to a [`CompletionProvider`] as grounding context.
//!
//! ## Architecture
//!
//! ```text
//! Ingest:  text → Chunker → EmbeddingProvider → VectorStore
//! Query:   question → EmbeddingProvider → Retriever → context → CompletionProvider
//! ```
//!
//! Both providers are capability traits — any backend (local model, remote
//! API) can be substituted without touching chunking, storage, or ranking.
//! The bundled [`InMemoryVectorStore`] is an append-only exhaustive-scan
//! store; an indexed backend slots in behind the [`VectorStore`] trait.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docrag::{
//!     DocumentSource, InMemoryVectorStore, RagConfig, RagPipeline, RecursiveChunker,
//! };
//!
//! let config = RagConfig::default();
//! let embedder: Arc<dyn docrag::EmbeddingProvider> = Arc::new(my_embedder);
//!
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .chunker(Arc::new(RecursiveChunker::new(config.chunk_size, config.chunk_overlap)))
//!     .embedding_provider(embedder.clone())
//!     .vector_store(Arc::new(InMemoryVectorStore::new(embedder)))
//!     .completion_provider(Arc::new(my_model))
//!     .build()?;
//!
//! pipeline.ingest(&page_text, DocumentSource::Url(url)).await?;
//! let answer = pipeline.answer("What does the page say about pricing?").await?;
//! ```
//!
//! ## Features
//!
//! - `ollama` — `OllamaEmbeddingProvider` and `OllamaCompletionProvider`
//!   speaking the local Ollama HTTP API.

pub mod chunking;
pub mod completion;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
pub mod pipeline;
pub mod prompt;
pub mod retriever;
pub mod vectorstore;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use chunking::{Chunker, RecursiveChunker};
pub use completion::CompletionProvider;
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, DocumentSource, Record, ScoredResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use retriever::Retriever;
pub use vectorstore::VectorStore;
