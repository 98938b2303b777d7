//! RAG (Retrieval-Augmented Generation) question answering.
//!
//! Retrieves source-diversified context for a question, asks a generative
//! model to answer from it, and parses the labeled reply.

pub mod context;
mod generator;
pub mod parser;
mod response;

pub use context::ContextChunk;
pub use generator::{Generator, OpenAIGenerator};
pub use parser::{parse_structured_answer, ParsedAnswer, Section};
pub use response::{RagAnswer, RagEngine};

#[cfg(test)]
pub(crate) use response::tests as testing;
