//! JSONL corpus loading.
//!
//! One JSON object per line: `{"id": .., "text": .., "source": .., "embedding": [..]}`.

use super::{Chunk, Corpus};
use crate::error::{Result, SiftError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, instrument};

/// Load a corpus from a JSONL file.
#[instrument]
pub fn load_jsonl(path: &Path) -> Result<Corpus> {
    let file = File::open(path).map_err(|e| {
        SiftError::Corpus(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let corpus = Corpus::from_reader(BufReader::new(file))?;

    info!(
        "Loaded {} chunks from {} sources (dimension {})",
        corpus.len(),
        corpus.source_count(),
        corpus.dimension().unwrap_or(0)
    );

    Ok(corpus)
}

impl Corpus {
    /// Build a corpus from JSONL read from any buffered reader.
    ///
    /// Blank lines are skipped. A line that does not parse fails the whole load.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut chunks = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let chunk: Chunk = serde_json::from_str(&line).map_err(|e| {
                SiftError::Corpus(format!("line {}: {}", number + 1, e))
            })?;
            chunks.push(chunk);
        }

        Corpus::new(chunks)
    }
}
