//! HTTP API for question answering over the loaded corpus.
//!
//! Every request works on one corpus snapshot for its whole duration;
//! `/reload` builds a new corpus off the request path and swaps it in.

use crate::corpus::{load_jsonl, CorpusHandle};
use crate::rag::{ContextChunk, ParsedAnswer, RagEngine};
use crate::retrieval::SelectionParams;
use crate::SiftError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info};

/// Shared application state.
pub struct AppState {
    pub corpus: CorpusHandle,
    pub engine: RagEngine,
    /// File re-read by `/reload`.
    pub corpus_path: PathBuf,
}

impl AppState {
    pub fn new(corpus: CorpusHandle, engine: RagEngine, corpus_path: PathBuf) -> Self {
        Self {
            corpus,
            engine,
            corpus_path,
        }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/search", post(search))
        .route("/reload", post(reload))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Debug, Deserialize)]
struct QueryRequest {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    per_doc_k: Option<usize>,
    #[serde(default)]
    global_n: Option<usize>,
}

impl QueryRequest {
    /// The non-blank query text, if any.
    fn text(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn params(&self, defaults: SelectionParams) -> SelectionParams {
        SelectionParams::new(
            self.per_doc_k.unwrap_or(defaults.per_doc_k),
            self.global_n.unwrap_or(defaults.global_n),
        )
    }
}

#[derive(Serialize)]
struct QueryResponse {
    answer: ParsedAnswer,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<ContextChunk>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    chunks: usize,
    sources: usize,
    dimension: Option<usize>,
}

#[derive(Serialize)]
struct ReloadResponse {
    chunks: usize,
    previous_chunks: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn bad_request(msg: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn internal_error(e: &SiftError) -> Response {
    error!("Request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Internal Error: {}", e),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let corpus = state.corpus.snapshot();
    Json(HealthResponse {
        status: "ok",
        chunks: corpus.len(),
        sources: corpus.source_count(),
        dimension: corpus.dimension(),
    })
}

/// Body of `/query` and `/search`. A missing, malformed or non-JSON body is
/// treated like a request without a query.
type QueryPayload = std::result::Result<Json<QueryRequest>, JsonRejection>;

fn accept_query(payload: QueryPayload) -> Option<QueryRequest> {
    match payload {
        Ok(Json(req)) => Some(req),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection);
            None
        }
    }
}

async fn query(State(state): State<Arc<AppState>>, payload: QueryPayload) -> Response {
    let Some(req) = accept_query(payload) else {
        return bad_request("Query is required");
    };
    let Some(question) = req.text() else {
        return bad_request("Query is required");
    };
    info!("Query: {}", question);

    let corpus = state.corpus.snapshot();
    let params = req.params(state.engine.params());

    match state.engine.ask_with(&corpus, question, params).await {
        Ok(result) => Json(QueryResponse {
            answer: result.answer,
        })
        .into_response(),
        Err(e) => internal_error(&e),
    }
}

async fn search(State(state): State<Arc<AppState>>, payload: QueryPayload) -> Response {
    let Some(req) = accept_query(payload) else {
        return bad_request("Query is required");
    };
    let Some(question) = req.text() else {
        return bad_request("Query is required");
    };

    let corpus = state.corpus.snapshot();
    let params = req.params(state.engine.params());

    match state.engine.retrieve_with(&corpus, question, params).await {
        Ok(results) => Json(SearchResponse { results }).into_response(),
        Err(e) => internal_error(&e),
    }
}

async fn reload(State(state): State<Arc<AppState>>) -> Response {
    let path = state.corpus_path.clone();
    let loaded = tokio::task::spawn_blocking(move || load_jsonl(&path)).await;

    match loaded {
        Ok(Ok(corpus)) => {
            if let Err(e) = state.engine.check_corpus(&corpus) {
                return internal_error(&e);
            }
            let chunks = corpus.len();
            let previous = state.corpus.replace(corpus);
            info!("Reloaded corpus: {} -> {} chunks", previous.len(), chunks);
            Json(ReloadResponse {
                chunks,
                previous_chunks: previous.len(),
            })
            .into_response()
        }
        Ok(Err(e)) => internal_error(&e),
        Err(e) => internal_error(&SiftError::Corpus(format!("Reload task failed: {}", e))),
    }
}
