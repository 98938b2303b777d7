//! Serve command implementation.

use super::{build_engine, load_corpus};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::corpus::CorpusHandle;
use crate::server::{router, AppState};
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    preflight::check(Operation::Serve, &settings)?;

    let corpus = load_corpus(&settings)?;
    let chunk_count = corpus.len();
    let engine = build_engine(&settings, None)?;
    engine.check_corpus(&corpus)?;

    let state = Arc::new(AppState::new(
        CorpusHandle::new(corpus),
        engine,
        settings.corpus_path(),
    ));
    let app = router(state);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Ragsift API Server");
    println!();
    Output::success(&format!("Listening on http://{} ({} chunks)", addr, chunk_count));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Query (RAG)", "POST /query");
    Output::kv("Search", "POST /search");
    Output::kv("Reload corpus", "POST /reload");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
