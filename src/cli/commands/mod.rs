//! CLI command implementations.

mod ask;
mod config;
mod parse;
mod search;
mod serve;
mod stats;

pub use ask::run_ask;
pub use config::run_config;
pub use parse::run_parse;
pub use search::run_search;
pub use serve::run_serve;
pub use stats::run_stats;

use crate::cli::SelectionArgs;
use crate::config::{Prompts, Settings};
use crate::corpus::{load_jsonl, Corpus};
use crate::embedding::OpenAIEmbedder;
use crate::error::Result;
use crate::rag::{OpenAIGenerator, RagEngine};
use crate::retrieval::SelectionParams;
use std::sync::Arc;

/// Load the configured corpus.
pub(crate) fn load_corpus(settings: &Settings) -> Result<Corpus> {
    load_jsonl(&settings.corpus_path())
}

/// Build a RAG engine from settings, optionally overriding the model.
pub(crate) fn build_engine(settings: &Settings, model: Option<&str>) -> Result<RagEngine> {
    let embedder = Arc::new(OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
    )?);

    let generator = Arc::new(OpenAIGenerator::new(
        model.unwrap_or(&settings.generation.model),
        settings.generation.temperature,
        settings.generation.timeout(),
    )?);

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    Ok(RagEngine::new(embedder, generator)
        .with_params(settings.retrieval.params())
        .with_prompts(prompts))
}

/// Merge command-line bounds over the configured ones.
pub(crate) fn selection_params(args: SelectionArgs, settings: &Settings) -> SelectionParams {
    let defaults = settings.retrieval.params();
    SelectionParams::new(
        args.per_doc_k.unwrap_or(defaults.per_doc_k),
        args.global_n.unwrap_or(defaults.global_n),
    )
}
