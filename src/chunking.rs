//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`RecursiveChunker`], a
//! boundary-preference splitter that cuts at paragraph, sentence, or word
//! boundaries before falling back to a hard character cut.

use std::collections::HashMap;

use crate::document::Chunk;

/// A strategy for splitting document text into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no
/// embeddings; embedding and id assignment happen in the vector store's
/// write path.
pub trait Chunker: Send + Sync {
    /// Split document text into chunks, attaching `base_metadata` to each.
    ///
    /// Returns an empty `Vec` if the text is empty after trimming.
    /// Output is in document order and every chunk is non-empty.
    fn split(&self, text: &str, base_metadata: &HashMap<String, String>) -> Vec<Chunk>;
}

/// Boundary preference, strongest first: paragraph, sentence, then word.
const SEPARATOR_LEVELS: &[&[&str]] = &[&["\n\n"], &[". ", "! ", "? "], &[" "]];

/// Splits text into bounded-size chunks, preferring natural boundaries.
///
/// Each chunk holds at most `chunk_size` characters. The cut point is the
/// latest boundary inside the window (a paragraph break, then a sentence
/// end, then a space), falling back to the hard `chunk_size` limit when no
/// boundary exists. The next chunk starts `chunk_overlap` characters before the
/// previous cut, so consecutive chunks share context across the boundary.
///
/// Positions are counted in characters, not bytes, so multi-byte text is
/// never split mid-codepoint. Emitted chunks are trimmed of edge whitespace.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::RecursiveChunker;
///
/// let chunker = RecursiveChunker::new(800, 100);
/// let chunks = chunker.split(&text, &metadata);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between
    ///   consecutive chunks; must be less than `chunk_size`
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        debug_assert!(chunk_overlap < chunk_size);
        Self { chunk_size, chunk_overlap }
    }

    /// Pick the cut position for the chunk starting at `start`.
    ///
    /// Searches the window backwards for the strongest boundary whose cut
    /// keeps the chunk longer than the overlap, so the next start always
    /// advances. Falls back to the hard `chunk_size` limit.
    fn find_cut(&self, chars: &[char], start: usize) -> usize {
        let window_end = start + self.chunk_size;
        let floor = start + self.chunk_overlap + 1;

        for separators in SEPARATOR_LEVELS {
            for cut in (floor..=window_end).rev() {
                if separators.iter().any(|sep| boundary_ends_at(chars, start, cut, sep)) {
                    return cut;
                }
            }
        }

        window_end
    }
}

/// Whether `sep` ends exactly at `pos`, fully inside the chunk starting at
/// `start`. The separator stays attached to the preceding chunk.
fn boundary_ends_at(chars: &[char], start: usize, pos: usize, sep: &str) -> bool {
    let len = sep.chars().count();
    pos >= start + len && sep.chars().eq(chars[pos - len..pos].iter().copied())
}

impl Chunker for RecursiveChunker {
    fn split(&self, text: &str, base_metadata: &HashMap<String, String>) -> Vec<Chunk> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let mut pieces: Vec<String> = Vec::new();

        if chars.len() <= self.chunk_size {
            pieces.push(text.to_string());
        } else {
            let mut start = 0;
            loop {
                if chars.len() - start <= self.chunk_size {
                    pieces.push(chars[start..].iter().collect());
                    break;
                }
                let cut = self.find_cut(&chars, start);
                pieces.push(chars[start..cut].iter().collect());
                // Step back by the overlap; always advance at least one char.
                start = cut.saturating_sub(self.chunk_overlap).max(start + 1);
            }
        }

        pieces
            .iter()
            .map(|piece| piece.trim())
            .filter(|piece| !piece.is_empty())
            .enumerate()
            .map(|(i, piece)| {
                let mut metadata = base_metadata.clone();
                metadata.insert("chunk_index".to_string(), i.to_string());
                Chunk { text: piece.to_string(), metadata }
            })
            .collect()
    }
}
