//! RAG response generation.

use super::context::{format_context_for_prompt, preview, ContextChunk};
use super::generator::Generator;
use super::parser::{parse_structured_answer, ParsedAnswer};
use crate::config::Prompts;
use crate::corpus::Corpus;
use crate::embedding::Embedder;
use crate::error::{Result, SiftError};
use crate::retrieval::{select_top_chunks, SelectionParams};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// RAG engine for question answering.
pub struct RagEngine {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    params: SelectionParams,
    prompts: Prompts,
}

impl RagEngine {
    /// Create a new RAG engine.
    pub fn new(embedder: Arc<dyn Embedder>, generator: Arc<dyn Generator>) -> Self {
        Self {
            embedder,
            generator,
            params: SelectionParams::default(),
            prompts: Prompts::default(),
        }
    }

    /// Set the selection bounds.
    pub fn with_params(mut self, params: SelectionParams) -> Self {
        self.params = params;
        self
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn params(&self) -> SelectionParams {
        self.params
    }

    /// Fail early when the embedder cannot produce vectors the corpus can
    /// be searched with. An empty corpus accepts any embedder.
    pub fn check_corpus(&self, corpus: &Corpus) -> Result<()> {
        match corpus.dimension() {
            Some(expected) if expected != self.embedder.dimensions() => {
                Err(SiftError::DimensionMismatch {
                    expected,
                    actual: self.embedder.dimensions(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Embed the question and select context from the corpus.
    pub async fn retrieve(&self, corpus: &Corpus, question: &str) -> Result<Vec<ContextChunk>> {
        self.retrieve_with(corpus, question, self.params).await
    }

    /// Like [`retrieve`](Self::retrieve) with per-call selection bounds.
    #[instrument(skip(self, corpus), fields(chunks = corpus.len()))]
    pub async fn retrieve_with(
        &self,
        corpus: &Corpus,
        question: &str,
        params: SelectionParams,
    ) -> Result<Vec<ContextChunk>> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SiftError::InvalidInput("Query is required".to_string()));
        }

        let query_embedding = self.embedder.embed(question).await?;
        let selection = select_top_chunks(corpus, &query_embedding, params)?;

        Ok(ContextChunk::from_selection(&selection))
    }

    /// Answer a question from the corpus.
    ///
    /// When nothing is retrieved the generator is not called and the answer is
    /// [`ParsedAnswer::not_available`].
    pub async fn ask(&self, corpus: &Corpus, question: &str) -> Result<RagAnswer> {
        self.ask_with(corpus, question, self.params).await
    }

    /// Like [`ask`](Self::ask) with per-call selection bounds.
    #[instrument(skip(self, corpus), fields(chunks = corpus.len()))]
    pub async fn ask_with(
        &self,
        corpus: &Corpus,
        question: &str,
        params: SelectionParams,
    ) -> Result<RagAnswer> {
        info!("Processing question: {}", question);

        let context = self.retrieve_with(corpus, question, params).await?;

        if context.is_empty() {
            warn!("No context retrieved, returning fallback answer");
            return Ok(RagAnswer {
                answer: ParsedAnswer::not_available(),
                raw: String::new(),
                context,
            });
        }

        debug!(
            "Top chunks for context: {:?}",
            context.iter().map(|c| preview(&c.text, 100)).collect::<Vec<_>>()
        );

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.trim().to_string());
        vars.insert("context".to_string(), format_context_for_prompt(&context));

        let user_prompt = self.prompts.render_with_custom(&self.prompts.rag.user, &vars);
        let system_prompt = self
            .prompts
            .render_with_custom(&self.prompts.rag.system, &vars);

        let raw = self.generator.generate(&system_prompt, &user_prompt).await?;
        debug!("Raw model answer: {}", raw);

        let answer = parse_structured_answer(&raw);
        if answer.is_empty() {
            warn!("Model reply contained none of the expected sections");
        }

        Ok(RagAnswer {
            answer,
            raw,
            context,
        })
    }
}

/// A RAG answer with the context it was grounded on.
#[derive(Debug, Clone, Serialize)]
pub struct RagAnswer {
    /// The structured answer.
    pub answer: ParsedAnswer,
    /// Unparsed model reply (empty when the generator was not called).
    pub raw: String,
    /// Context chunks passed to the model.
    pub context: Vec<ContextChunk>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::corpus::Chunk;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Embedder that returns a fixed vector for every text.
    pub(crate) struct FixedEmbedder(pub Vec<f32>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| self.0.clone()).collect())
        }

        fn dimensions(&self) -> usize {
            self.0.len()
        }
    }

    /// Generator that replays a canned reply and records the prompts it saw.
    pub(crate) struct CannedGenerator {
        pub reply: String,
        pub prompts: Mutex<Vec<(String, String)>>,
    }

    impl CannedGenerator {
        pub(crate) fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Generator for CannedGenerator {
        async fn generate(&self, system: &str, user: &str) -> Result<String> {
            self.prompts
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            Ok(self.reply.clone())
        }
    }

    pub(crate) fn sample_corpus() -> Corpus {
        Corpus::new(vec![
            Chunk::new("1", "Aspirin is taken with water.", "aspirin.pdf", vec![1.0, 0.0]),
            Chunk::new("2", "Store below 25C.", "aspirin.pdf", vec![0.2, 1.0]),
            Chunk::new("3", "Ibuprofen may upset the stomach.", "ibuprofen.pdf", vec![0.9, 0.3]),
        ])
        .unwrap()
    }

    #[test]
    fn test_check_corpus_compares_embedder_dimensions() {
        let corpus = sample_corpus();
        let engine = |dims: usize| {
            RagEngine::new(
                Arc::new(FixedEmbedder(vec![0.5; dims])),
                Arc::new(CannedGenerator::new("")),
            )
        };

        assert!(engine(2).check_corpus(&corpus).is_ok());
        assert!(matches!(
            engine(384).check_corpus(&corpus),
            Err(SiftError::DimensionMismatch {
                expected: 2,
                actual: 384
            })
        ));
        assert!(engine(384).check_corpus(&Corpus::empty()).is_ok());
    }

    const REPLY: &str = "Concise Answer: With water.\nDetailed Explanation: Swallow whole\nwith a full glass.\nSources:\naspirin.pdf: taken with water";

    #[tokio::test]
    async fn test_ask_parses_reply() {
        let generator = Arc::new(CannedGenerator::new(REPLY));
        let engine = RagEngine::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), generator.clone());

        let result = engine.ask(&sample_corpus(), "How is aspirin taken?").await.unwrap();

        assert_eq!(result.answer.concise, "With water.");
        assert_eq!(result.answer.detailed, "Swallow whole with a full glass.");
        assert_eq!(result.answer.sources, vec!["aspirin.pdf: taken with water"]);
        assert_eq!(result.context[0].id, "1");
        assert_eq!(result.raw, REPLY);

        let prompts = generator.prompts.lock().unwrap();
        let (_, user) = &prompts[0];
        assert!(user.contains("Question: How is aspirin taken?"));
        assert!(user.contains("Aspirin is taken with water."));
        assert!(!user.contains("{{context}}"));
    }

    #[tokio::test]
    async fn test_ask_respects_params() {
        let generator = Arc::new(CannedGenerator::new(REPLY));
        let engine = RagEngine::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), generator)
            .with_params(SelectionParams::new(1, 10));

        let result = engine.ask(&sample_corpus(), "aspirin").await.unwrap();
        let ids: Vec<_> = result.context.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_empty_corpus_skips_generation() {
        let generator = Arc::new(CannedGenerator::new(REPLY));
        let engine = RagEngine::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), generator.clone());

        let result = engine.ask(&Corpus::empty(), "anything").await.unwrap();

        assert_eq!(result.answer, ParsedAnswer::not_available());
        assert!(result.context.is_empty());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_question_rejected() {
        let engine = RagEngine::new(
            Arc::new(FixedEmbedder(vec![1.0, 0.0])),
            Arc::new(CannedGenerator::new(REPLY)),
        );

        let err = engine.ask(&sample_corpus(), "   ").await.unwrap_err();
        assert!(matches!(err, SiftError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_propagates() {
        let generator = Arc::new(CannedGenerator::new(REPLY));
        let engine = RagEngine::new(Arc::new(FixedEmbedder(vec![1.0, 0.0, 0.0])), generator.clone());

        let err = engine.ask(&sample_corpus(), "aspirin").await.unwrap_err();
        assert!(matches!(
            err,
            SiftError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(generator.calls(), 0);
    }
}
