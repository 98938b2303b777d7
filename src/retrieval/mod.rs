//! Similarity scoring and per-source diversified ranking.

mod selector;
mod similarity;

pub use selector::{select_top_chunks, ScoredChunk, SelectionParams};
pub use similarity::cosine_similarity;
