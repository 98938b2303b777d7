//! Ask command implementation.

use super::{build_engine, load_corpus, selection_params};
use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, SelectionArgs};
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    selection: SelectionArgs,
    model: Option<String>,
    raw: bool,
    json: bool,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let corpus = load_corpus(&settings)?;
    let engine = build_engine(&settings, model.as_deref())?;
    engine.check_corpus(&corpus)?;
    let params = selection_params(selection, &settings);

    let spinner = Output::spinner("Searching corpus...");
    let result = engine.ask_with(&corpus, question, params).await;
    spinner.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result.answer)?);
        return Ok(());
    }

    if result.context.is_empty() {
        Output::warning("No relevant chunks found in the corpus.");
    }

    Output::answer(&result.answer);

    if raw && !result.raw.is_empty() {
        Output::header("Raw Reply");
        println!("{}", result.raw);
    }

    if !result.context.is_empty() {
        Output::header("Retrieved Context");
        for (i, chunk) in result.context.iter().enumerate() {
            Output::context_chunk(i + 1, chunk);
        }
    }

    Ok(())
}
