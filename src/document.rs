//! Data types for chunks, persisted records, and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Where an ingested document came from.
///
/// The variants map to the `source` metadata tag attached to every chunk:
/// `Text` → `"text-input"`, `PdfUpload` → `"pdf-upload"`, `Url` → the URL
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentSource {
    /// Raw text pasted or posted directly.
    Text,
    /// Text extracted from an uploaded PDF.
    PdfUpload,
    /// Text scraped from a web page at the given URL.
    Url(String),
}

impl DocumentSource {
    /// The value stored under the `source` metadata key.
    pub fn tag(&self) -> String {
        match self {
            Self::Text => "text-input".to_string(),
            Self::PdfUpload => "pdf-upload".to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

/// A contiguous slice of a source document, produced by a
/// [`Chunker`](crate::chunking::Chunker).
///
/// Chunks exist only in memory during ingestion; once embedded and persisted
/// they become [`Record`]s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The text content of the chunk. Never empty.
    pub text: String,
    /// Key-value metadata inherited from the source document plus
    /// chunk-specific fields.
    pub metadata: HashMap<String, String>,
}

/// The persisted unit of the vector store.
///
/// Records are immutable once written; the store is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Opaque unique identifier, assigned at write time.
    pub id: String,
    /// The chunk text this record was created from.
    pub content: String,
    /// The embedding vector for `content`. Every record in a store has the
    /// same length.
    pub embedding: Vec<f32>,
    /// Key-value metadata carried over from the chunk.
    pub metadata: HashMap<String, String>,
}

/// A retrieved record paired with its cosine similarity to the query.
///
/// Produced fresh per query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredResult {
    /// The retrieved chunk text.
    pub content: String,
    /// Metadata of the retrieved record.
    pub metadata: HashMap<String, String>,
    /// Cosine similarity in `[-1, 1]`; `0.0` when either vector has zero
    /// magnitude.
    pub similarity: f32,
}
