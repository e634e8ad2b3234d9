//! Completion provider trait for generating answers from a prompt.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates a text completion for a prompt.
///
/// The pipeline hands the fully assembled grounding prompt to this
/// capability and returns its output verbatim. Implementations wrap a
/// specific language-model backend (local model, remote API).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
