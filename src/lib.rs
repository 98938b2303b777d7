//! Ragsift - retrieval and answer parsing for RAG services
//!
//! Picks a bounded, source-diversified set of document chunks for a query
//! vector and turns a generative model's labeled reply into a structured answer.
//!
//! # Overview
//!
//! Ragsift allows you to:
//! - Load a corpus of pre-embedded chunks from a JSONL file
//! - Rank chunks by cosine similarity while capping how many come from one source
//! - Ask questions and get `{concise, detailed, sources}` answers back
//! - Serve all of the above over HTTP
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings and prompt templates
//! - `corpus` - Chunk records, JSONL loading and atomic corpus publication
//! - `retrieval` - Cosine similarity and per-source diversified selection
//! - `embedding` - Query embedding providers
//! - `rag` - Prompt assembly, generation and structured reply parsing
//! - `server` - HTTP API
//!
//! # Example
//!
//! ```rust
//! use ragsift::corpus::{Chunk, Corpus};
//! use ragsift::retrieval::{select_top_chunks, SelectionParams};
//!
//! let corpus = Corpus::new(vec![
//!     Chunk::new("a1", "Aspirin thins the blood.", "aspirin.pdf", vec![1.0, 0.0]),
//!     Chunk::new("b1", "Ibuprofen reduces swelling.", "ibuprofen.pdf", vec![0.0, 1.0]),
//! ])?;
//!
//! let top = select_top_chunks(&corpus, &[1.0, 0.1], SelectionParams::default())?;
//! assert_eq!(top[0].chunk.id, "a1");
//! # Ok::<(), ragsift::SiftError>(())
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod rag;
pub mod retrieval;
pub mod server;

pub use error::{Result, SiftError};
