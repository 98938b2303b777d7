//! Search command implementation.

use super::{build_engine, load_corpus, selection_params};
use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, SelectionArgs};
use crate::config::Settings;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(query: &str, selection: SelectionArgs, settings: Settings) -> Result<()> {
    preflight::check(Operation::Search, &settings)?;

    let corpus = load_corpus(&settings)?;
    let engine = build_engine(&settings, None)?;
    engine.check_corpus(&corpus)?;
    let params = selection_params(selection, &settings);

    let spinner = Output::spinner("Searching...");
    let results = engine.retrieve_with(&corpus, query, params).await;
    spinner.finish_and_clear();

    match results {
        Ok(chunks) if chunks.is_empty() => {
            Output::warning("No results found matching your query.");
        }
        Ok(chunks) => {
            Output::success(&format!(
                "Found {} chunks (per_doc_k={}, global_n={})",
                chunks.len(),
                params.per_doc_k,
                params.global_n
            ));
            for (i, chunk) in chunks.iter().enumerate() {
                Output::context_chunk(i + 1, chunk);
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
