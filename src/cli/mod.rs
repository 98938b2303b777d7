//! CLI module for Ragsift.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Ragsift - retrieval and answer parsing for RAG services
///
/// Selects source-diversified context from a pre-embedded corpus and turns
/// model replies into concise/detailed/sources answers.
#[derive(Parser, Debug)]
#[command(name = "ragsift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RAGSIFT_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Selection bounds shared by retrieval commands.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct SelectionArgs {
    /// Maximum chunks per source document (default from config)
    #[arg(short = 'k', long)]
    pub per_doc_k: Option<usize>,

    /// Maximum chunks overall (default from config)
    #[arg(short = 'n', long)]
    pub global_n: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default from config or PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a question and get a structured answer
    Ask {
        /// The question to ask
        question: String,

        #[command(flatten)]
        selection: SelectionArgs,

        /// LLM model to use for response generation
        #[arg(short, long)]
        model: Option<String>,

        /// Print the unparsed model reply as well
        #[arg(long)]
        raw: bool,

        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the chunks that would be used as context for a query
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Parse a saved model reply into a structured answer (JSON)
    Parse {
        /// File containing the reply (stdin if not specified)
        file: Option<String>,
    },

    /// Show corpus statistics
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_with_bounds() {
        let cli = Cli::parse_from(["ragsift", "-vv", "ask", "what dose?", "-k", "2", "-n", "5"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask {
                question,
                selection,
                ..
            } => {
                assert_eq!(question, "what dose?");
                assert_eq!(selection.per_doc_k, Some(2));
                assert_eq!(selection.global_n, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
