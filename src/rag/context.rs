//! Context building for RAG prompts.

use crate::retrieval::ScoredChunk;
use serde::Serialize;

/// A selected chunk, owned, for prompts and output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextChunk {
    /// Chunk ID.
    pub id: String,
    /// Source document the chunk came from.
    #[serde(rename = "source")]
    pub source_id: String,
    /// Text content.
    pub text: String,
    /// Similarity score.
    pub score: f32,
}

impl From<&ScoredChunk<'_>> for ContextChunk {
    fn from(scored: &ScoredChunk<'_>) -> Self {
        Self {
            id: scored.chunk.id.clone(),
            source_id: scored.chunk.source_id.clone(),
            text: scored.chunk.text.clone(),
            score: scored.score,
        }
    }
}

impl ContextChunk {
    /// Convert a whole selection.
    pub fn from_selection(selection: &[ScoredChunk<'_>]) -> Vec<Self> {
        selection.iter().map(ContextChunk::from).collect()
    }
}

/// Format context chunks for inclusion in a prompt.
pub fn format_context_for_prompt(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("[{}] {}\n{}", i + 1, chunk.source_id, chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Truncate text to at most `max_chars` characters, adding an ellipsis.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}
