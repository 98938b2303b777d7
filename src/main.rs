//! Ragsift CLI entry point.

use anyhow::Result;
use clap::Parser;
use ragsift::cli::{commands, Cli, Commands};
use ragsift::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_deref())?;

    // -v flags win over the configured level; RUST_LOG wins over both.
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ragsift={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match &cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Ask {
            question,
            selection,
            model,
            raw,
            json,
        } => {
            commands::run_ask(question, *selection, model.clone(), *raw, *json, settings).await?;
        }

        Commands::Search { query, selection } => {
            commands::run_search(query, *selection, settings).await?;
        }

        Commands::Parse { file } => {
            commands::run_parse(file.as_deref())?;
        }

        Commands::Stats => {
            commands::run_stats(settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, config_path.as_deref())?;
        }
    }

    Ok(())
}
