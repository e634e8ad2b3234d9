//! Error types for the `docrag` crate.

use thiserror::Error;

/// Errors that can occur in the ingestion and question-answering pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    /// The embedding provider call failed or timed out.
    #[error("Embedding provider error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The completion provider call failed or timed out.
    #[error("Completion provider error ({provider}): {message}")]
    Completion {
        /// The completion provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An embedding's length is inconsistent with the store's established
    /// dimensionality.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality established by the store.
        expected: usize,
        /// The dimensionality of the offending vector.
        actual: usize,
    },

    /// A caller-supplied argument is invalid (e.g. `k == 0`, empty question).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Ingestion was called with no usable text.
    #[error("No usable text content to ingest")]
    EmptyContent,

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
