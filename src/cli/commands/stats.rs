//! Stats command implementation.

use super::load_corpus;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;
use std::collections::BTreeMap;

/// Print a summary of the configured corpus.
pub fn run_stats(settings: Settings) -> Result<()> {
    preflight::check(Operation::Stats, &settings)?;

    let corpus = load_corpus(&settings)?;

    Output::header("Corpus");
    Output::kv("Path", &settings.corpus_path().display().to_string());
    Output::kv("Chunks", &corpus.len().to_string());
    Output::kv("Sources", &corpus.source_count().to_string());
    Output::kv(
        "Dimension",
        &corpus
            .dimension()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );

    if let Some(dimension) = corpus.dimension() {
        if dimension != settings.embedding.dimensions as usize {
            Output::warning(&format!(
                "Corpus dimension {} differs from embedding.dimensions = {}; queries will fail",
                dimension, settings.embedding.dimensions
            ));
        }
    }

    let mut per_source: BTreeMap<&str, usize> = BTreeMap::new();
    for chunk in &corpus {
        *per_source.entry(chunk.source_id.as_str()).or_default() += 1;
    }

    if !per_source.is_empty() {
        Output::header("Chunks per source");
        for (source, count) in per_source {
            Output::list_item(&format!("{} ({})", source, count));
        }
    }

    Ok(())
}
