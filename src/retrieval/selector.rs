//! Per-source diversified top-N selection.
//!
//! Every chunk is scored against the query, each source keeps only its best
//! `per_doc_k` chunks, and the survivors are merged back into one ranking
//! capped at `global_n`. Ties always resolve to corpus insertion order.

use super::cosine_similarity;
use crate::corpus::{Chunk, Corpus};
use crate::error::{Result, SiftError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Default number of chunks a single source may contribute.
pub const DEFAULT_PER_DOC_K: usize = 3;
/// Default size of the final result.
pub const DEFAULT_GLOBAL_N: usize = 10;

/// Bounds applied by [`select_top_chunks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    /// Maximum chunks kept per source before the global merge.
    pub per_doc_k: usize,
    /// Maximum chunks returned overall.
    pub global_n: usize,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            per_doc_k: DEFAULT_PER_DOC_K,
            global_n: DEFAULT_GLOBAL_N,
        }
    }
}

impl SelectionParams {
    pub fn new(per_doc_k: usize, global_n: usize) -> Self {
        Self {
            per_doc_k,
            global_n,
        }
    }
}

/// A corpus chunk paired with its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredChunk<'a> {
    /// The scored chunk.
    pub chunk: &'a Chunk,
    /// Cosine similarity to the query (higher is better).
    pub score: f32,
    /// Position of the chunk in the corpus.
    pub index: usize,
}

/// Descending score, then ascending corpus position.
fn rank_order(a: &ScoredChunk<'_>, b: &ScoredChunk<'_>) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.index.cmp(&b.index))
}

/// Select the most relevant chunks, keeping at most `per_doc_k` per source and
/// `global_n` overall.
///
/// An empty corpus or a zero bound yields an empty result. A query whose
/// length differs from the corpus dimension fails with
/// [`SiftError::DimensionMismatch`].
pub fn select_top_chunks<'a>(
    corpus: &'a Corpus,
    query: &[f32],
    params: SelectionParams,
) -> Result<Vec<ScoredChunk<'a>>> {
    let Some(dimension) = corpus.dimension() else {
        return Ok(Vec::new());
    };

    if query.len() != dimension {
        return Err(SiftError::DimensionMismatch {
            expected: dimension,
            actual: query.len(),
        });
    }

    if params.per_doc_k == 0 || params.global_n == 0 {
        return Ok(Vec::new());
    }

    // Buckets are kept in order of each source's first appearance.
    let mut bucket_of: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<Vec<ScoredChunk<'a>>> = Vec::new();

    for (index, chunk) in corpus.iter().enumerate() {
        let score = cosine_similarity(query, &chunk.embedding)?;
        let slot = *bucket_of.entry(chunk.source_id.as_str()).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(ScoredChunk {
            chunk,
            score,
            index,
        });
    }

    let source_count = buckets.len();
    let mut merged: Vec<ScoredChunk<'a>> = Vec::new();
    for mut bucket in buckets {
        bucket.sort_by(rank_order);
        bucket.truncate(params.per_doc_k);
        merged.extend(bucket);
    }

    merged.sort_by(rank_order);
    merged.truncate(params.global_n);

    debug!(
        "Selected {} of {} chunks across {} sources (per_doc_k={}, global_n={})",
        merged.len(),
        corpus.len(),
        source_count,
        params.per_doc_k,
        params.global_n
    );

    Ok(merged)
}
