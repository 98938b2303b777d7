//! Pre-flight checks before operations that need external services.
//!
//! Fails early with an actionable message instead of midway through a request.

use crate::config::Settings;
use crate::error::{Result, SiftError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving needs the API key and the corpus file.
    Serve,
    /// Asking needs the API key and the corpus file.
    Ask,
    /// Search embeds the query, so it needs both too.
    Search,
    /// Stats only reads the corpus.
    Stats,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Serve | Operation::Ask | Operation::Search => {
            check_api_key()?;
            check_corpus(settings)?;
        }
        Operation::Stats => {
            check_corpus(settings)?;
        }
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(SiftError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(SiftError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

/// Check that the configured corpus file exists.
fn check_corpus(settings: &Settings) -> Result<()> {
    let path = settings.corpus_path();
    if path.is_file() {
        Ok(())
    } else {
        Err(SiftError::Config(format!(
            "Corpus file not found: {}. Set corpus.path in {}",
            path.display(),
            Settings::default_config_path().display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_corpus_fails_stats() {
        let mut settings = Settings::default();
        settings.corpus.path = "/definitely/not/here.jsonl".to_string();

        let err = check(Operation::Stats, &settings).unwrap_err();
        assert!(matches!(err, SiftError::Config(msg) if msg.contains("not/here.jsonl")));
    }

    #[test]
    fn test_existing_corpus_passes_stats() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut settings = Settings::default();
        settings.corpus.path = file.path().to_string_lossy().into_owned();

        assert!(check(Operation::Stats, &settings).is_ok());
    }
}
