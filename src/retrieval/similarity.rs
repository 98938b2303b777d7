//! Cosine similarity between embedding vectors.

use crate::error::{Result, SiftError};

/// Compute cosine similarity between two vectors of equal length.
///
/// Returns `0.0` when either vector has zero norm, or when the inputs contain
/// values (NaN, infinities) that would otherwise leak a non-finite score into
/// the ranking. Sums are accumulated in `f64`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(SiftError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let score = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !score.is_finite() {
        return Ok(0.0);
    }

    Ok(score as f32)
}
