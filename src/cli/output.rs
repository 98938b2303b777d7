//! CLI output formatting utilities.

use crate::rag::context::preview;
use crate::rag::{ContextChunk, ParsedAnswer};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print one retrieved chunk.
    pub fn context_chunk(rank: usize, chunk: &ContextChunk) {
        println!(
            "\n{} {} {} (score: {:.3})",
            style(format!("[{}]", rank)).green(),
            style(&chunk.source_id).bold(),
            style(&chunk.id).dim(),
            chunk.score
        );
        println!("   {}", preview(&chunk.text, 200));
    }

    /// Print a structured answer.
    pub fn answer(answer: &ParsedAnswer) {
        Self::header("Concise Answer");
        println!("{}", answer.concise);
        Self::header("Detailed Explanation");
        println!("{}", answer.detailed);
        if !answer.sources.is_empty() {
            Self::header("Sources");
            for source in &answer.sources {
                Self::list_item(source);
            }
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
