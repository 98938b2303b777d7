//! Corpus of pre-embedded document chunks.
//!
//! A [`Corpus`] is built once, validated, and then only ever read. Reloading
//! builds a fresh value and publishes it through a [`CorpusHandle`].

mod loader;

pub use loader::load_jsonl;

use crate::error::{Result, SiftError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// A unit of source text together with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk identifier.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Text content of this chunk.
    pub text: String,
    /// Identifier of the document this chunk was cut from.
    #[serde(rename = "source")]
    pub source_id: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        source_id: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source_id: source_id.into(),
            embedding,
        }
    }
}

/// Embedding files written by different tools use either numeric or string ids.
fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Immutable, ordered collection of chunks sharing one embedding dimension.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    chunks: Vec<Chunk>,
    dimension: Option<usize>,
}

impl Corpus {
    /// Build a corpus, checking that every embedding has the same non-zero length.
    pub fn new(chunks: Vec<Chunk>) -> Result<Self> {
        let mut dimension = None;

        for (position, chunk) in chunks.iter().enumerate() {
            let len = chunk.embedding.len();
            if len == 0 {
                return Err(SiftError::Corpus(format!(
                    "chunk '{}' (position {}) has an empty embedding",
                    chunk.id, position
                )));
            }
            match dimension {
                None => dimension = Some(len),
                Some(expected) if expected != len => {
                    return Err(SiftError::Corpus(format!(
                        "chunk '{}' (position {}) has dimension {}, expected {}",
                        chunk.id, position, len, expected
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Self { chunks, dimension })
    }

    /// An empty corpus.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Shared embedding dimension, `None` for an empty corpus.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Chunks in insertion order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Number of distinct source ids.
    pub fn source_count(&self) -> usize {
        self.chunks
            .iter()
            .map(|c| c.source_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Shared publication point for the corpus being served.
///
/// Readers take a [`snapshot`](CorpusHandle::snapshot) and keep it for the
/// whole request; [`replace`](CorpusHandle::replace) swaps in a fully built
/// corpus in one step, so nobody ever sees a partially loaded one.
#[derive(Debug, Default)]
pub struct CorpusHandle {
    current: RwLock<Arc<Corpus>>,
}

impl CorpusHandle {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            current: RwLock::new(Arc::new(corpus)),
        }
    }

    /// The corpus currently being served.
    pub fn snapshot(&self) -> Arc<Corpus> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Publish a new corpus, returning the one it replaced.
    pub fn replace(&self, corpus: Corpus) -> Arc<Corpus> {
        let next = Arc::new(corpus);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    }
}
