//! Ollama embedding and completion providers using the local Ollama HTTP API.
//!
//! This module is only available when the `ollama` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::completion::CompletionProvider;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The default Ollama server address.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The default embedding model.
const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// The dimensionality of `nomic-embed-text` embeddings.
const DEFAULT_DIMENSIONS: usize = 768;

/// The default completion model.
const DEFAULT_COMPLETION_MODEL: &str = "mistral:latest";

/// The default sampling temperature for answers. Kept low so the model
/// stays close to the grounding context.
const DEFAULT_TEMPERATURE: f32 = 0.1;

/// An [`EmbeddingProvider`] backed by the Ollama `/api/embeddings` endpoint.
///
/// Ollama has no native batch endpoint, so batching falls back to the
/// sequential default of [`EmbeddingProvider::embed_batch`].
///
/// # Configuration
///
/// - `base_url` – defaults to `http://localhost:11434`.
/// - `model` – defaults to `nomic-embed-text`.
/// - `dimensions` – must match the configured model; defaults to 768.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::ollama::OllamaEmbeddingProvider;
///
/// let provider = OllamaEmbeddingProvider::new()
///     .with_base_url("http://ollama:11434");
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl Default for OllamaEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaEmbeddingProvider {
    /// Create a new provider with the default server address and model.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Set the Ollama server address (e.g. `http://ollama:11434`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the embedding model name.
    ///
    /// Remember to also set [`with_dimensions`](Self::with_dimensions) if
    /// the model's output size differs from the default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected embedding dimensionality.
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self
    }
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Extract the error message from an Ollama error body, falling back to the
/// raw body text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Ollama", model = %self.model, text_len = text.len(), "embedding text");

        let request_body = EmbeddingRequest { model: &self.model, prompt: text };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "embedding request failed");
                RagError::Embedding {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = "Ollama", %status, "embedding API error");
            return Err(RagError::Embedding {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {}", error_detail(&body)),
            });
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse embedding response");
            RagError::Embedding {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        let embedding = embedding_response.embedding;
        if embedding.len() != self.dimensions {
            return Err(RagError::Embedding {
                provider: "Ollama".into(),
                message: format!(
                    "model '{}' returned {} dimensions, expected {}",
                    self.model,
                    embedding.len(),
                    self.dimensions
                ),
            });
        }

        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// A [`CompletionProvider`] backed by the Ollama `/api/generate` endpoint.
///
/// Requests non-streaming generation with a low default temperature.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::ollama::OllamaCompletionProvider;
///
/// let provider = OllamaCompletionProvider::new()
///     .with_model("mistral:latest");
/// let answer = provider.complete(&prompt).await?;
/// ```
pub struct OllamaCompletionProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl Default for OllamaCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaCompletionProvider {
    /// Create a new provider with the default server address and model.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set the Ollama server address (e.g. `http://ollama:11434`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the completion model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl CompletionProvider for OllamaCompletionProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            provider = "Ollama",
            model = %self.model,
            prompt_len = prompt.len(),
            "requesting completion"
        );

        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature: self.temperature },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "completion request failed");
                RagError::Completion {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = "Ollama", %status, "completion API error");
            return Err(RagError::Completion {
                provider: "Ollama".into(),
                message: format!("API returned {status}: {}", error_detail(&body)),
            });
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse completion response");
            RagError::Completion {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(generate_response.response)
    }
}
