//! Parse command implementation.

use crate::rag::parse_structured_answer;
use anyhow::{Context, Result};
use std::io::Read;

/// Parse a model reply from a file or stdin and print it as JSON.
pub fn run_parse(file: Option<&str>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let answer = parse_structured_answer(&raw);
    println!("{}", serde_json::to_string_pretty(&answer)?);
    Ok(())
}
