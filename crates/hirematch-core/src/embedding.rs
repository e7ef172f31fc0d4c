//! Embedding provider trait and vector similarity.
//!
//! Defines the [`EmbeddingProvider`] trait that all embedding backends
//! implement and the [`Embedding`] outcome they return. A provider never
//! errors: a missing credential, a transport failure, or an unrecognized
//! response all come back as [`Embedding::Unavailable`], and the ranking
//! pipeline falls back to keyword scoring.
//!
//! Concrete providers (Hugging Face, OpenAI, local fastembed) live in the
//! `hirematch` app crate.

use async_trait::async_trait;
use thiserror::Error;

/// Result of asking a provider to embed one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedding {
    /// A fixed-length vector for the text.
    Vector(Vec<f32>),
    /// No vector could be produced; callers fall back to keywords.
    Unavailable,
}

/// Trait for embedding providers.
///
/// Implementations must be cheap to share across concurrent requests.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"sentence-transformers/all-MiniLM-L6-v2"`).
    fn model_name(&self) -> &str;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Embedding;
}

/// A provider that never produces vectors.
///
/// Used when `embedding.provider = "disabled"`; every search runs in
/// keyword mode.
pub struct DisabledProvider;

#[async_trait]
impl EmbeddingProvider for DisabledProvider {
    fn model_name(&self) -> &str {
        "disabled"
    }

    async fn embed(&self, _text: &str) -> Embedding {
        Embedding::Unavailable
    }
}

/// Errors from vector math.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    #[error("vector dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`:
/// - `1.0` = identical direction
/// - `0.0` = orthogonal (unrelated)
/// - `-1.0` = opposite direction
///
/// Returns `0.0` when either vector has zero magnitude (including empty
/// vectors), and [`VectorError::DimensionMismatch`] when lengths differ.
///
/// # Formula
///
/// ```text
///            a · b
/// cos(θ) = ─────────
///          ‖a‖ × ‖b‖
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return Ok(0.0);
    }

    Ok((dot / denom).clamp(-1.0, 1.0))
}

/// Cosine similarity mapped onto the integer `0..=100` match-score scale.
///
/// Negative similarity scores `0`.
pub fn similarity_score(similarity: f32) -> u32 {
    (similarity as f64 * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_symmetric() {
        let a = vec![0.3, -1.2, 4.0, 0.5];
        let b = vec![2.0, 0.1, -0.7, 1.5];
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_empty() {
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_different_lengths() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0];
        assert_eq!(
            cosine_similarity(&a, &b),
            Err(VectorError::DimensionMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_similarity_score_scale() {
        assert_eq!(similarity_score(1.0), 100);
        assert_eq!(similarity_score(0.876), 88);
        assert_eq!(similarity_score(0.0), 0);
        assert_eq!(similarity_score(-0.4), 0);
    }

    #[test]
    fn test_disabled_provider() {
        let emb = futures::executor::block_on(DisabledProvider.embed("java"));
        assert_eq!(emb, Embedding::Unavailable);
        assert_eq!(DisabledProvider.model_name(), "disabled");
    }
}
