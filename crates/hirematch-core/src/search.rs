//! Candidate ranking pipeline.
//!
//! The pipeline is a pure function of `(query, candidates)`: it issues no
//! store writes. The calling application fetches candidates from its
//! [`Store`](crate::store::Store), picks an [`EmbeddingProvider`], and
//! decides whether to record the outcome as a chat session.
//!
//! # Scoring Algorithm
//!
//! 1. Embed the query.
//! 2. If that produced a vector, embed every candidate's searchable text
//!    (at most `max_concurrency` calls in flight) and score
//!    `round(cosine × 100)`. A candidate whose embedding is unavailable or
//!    has a different dimension is scored by keywords instead.
//! 3. Otherwise score every candidate by keywords. The reported mode is
//!    `keyword` whenever no candidate was embedded, even if the query was.
//! 4. Keep scores strictly above `min_score`.
//! 5. Stable sort by score (desc); equal scores keep input order.
//! 6. Truncate to `final_limit`. `total` is the truncated length.

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::embedding::{cosine_similarity, similarity_score, Embedding, EmbeddingProvider};
use crate::keyword::keyword_score;
use crate::models::Candidate;

/// Ranking parameters, decoupled from application config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Results must score strictly above this.
    pub min_score: u32,
    /// Maximum results to return.
    pub final_limit: usize,
    /// Maximum concurrent candidate embedding calls.
    pub max_concurrency: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            min_score: 20,
            final_limit: 10,
            max_concurrency: 8,
        }
    }
}

/// How the scores in a [`RankedCandidates`] were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Every candidate was scored by embedding similarity.
    Semantic,
    /// Every candidate was scored by keyword overlap, whether or not the
    /// query itself embedded.
    Keyword,
    /// The query embedded, but some candidates fell back to keywords.
    Mixed,
}

/// Output of [`rank_candidates`].
#[derive(Debug, Clone)]
pub struct RankedCandidates {
    /// Copies of the input candidates with `match_score` set, best first.
    pub candidates: Vec<Candidate>,
    /// Equal to `candidates.len()`.
    pub total: usize,
    pub mode: ScoringMode,
}

/// Rank `candidates` against `query`.
///
/// Never fails: embedding problems degrade to keyword scoring.
pub async fn rank_candidates(
    provider: &dyn EmbeddingProvider,
    candidates: &[Candidate],
    query: &str,
    params: &SearchParams,
) -> RankedCandidates {
    let (scores, mode) = match provider.embed(query).await {
        Embedding::Vector(query_vec) => {
            let (scores, fallbacks) =
                semantic_scores(provider, candidates, query, &query_vec, params).await;
            let mode = if fallbacks == 0 {
                ScoringMode::Semantic
            } else if fallbacks == candidates.len() {
                tracing::debug!(fallbacks, "no candidate embedded, all scored by keywords");
                ScoringMode::Keyword
            } else {
                tracing::debug!(fallbacks, "some candidates scored by keywords");
                ScoringMode::Mixed
            };
            (scores, mode)
        }
        Embedding::Unavailable => {
            let scores = candidates
                .iter()
                .map(|c| keyword_score(query, &c.searchable_text()))
                .collect();
            (scores, ScoringMode::Keyword)
        }
    };

    let ranked = select_top(candidates, &scores, params);
    RankedCandidates {
        total: ranked.len(),
        candidates: ranked,
        mode,
    }
}

/// Score each candidate by embedding similarity, falling back to keywords
/// per candidate. Returns scores in input order plus the fallback count.
async fn semantic_scores(
    provider: &dyn EmbeddingProvider,
    candidates: &[Candidate],
    query: &str,
    query_vec: &[f32],
    params: &SearchParams,
) -> (Vec<u32>, usize) {
    let futures: Vec<_> = candidates
        .iter()
        .map(|candidate| async move {
            let text = candidate.searchable_text();
            match provider.embed(&text).await {
                Embedding::Vector(v) => match cosine_similarity(query_vec, &v) {
                    Ok(sim) => (similarity_score(sim), false),
                    Err(err) => {
                        tracing::warn!(
                            candidate = %candidate.id,
                            error = %err,
                            "candidate embedding unusable, using keyword score"
                        );
                        (keyword_score(query, &text), true)
                    }
                },
                Embedding::Unavailable => (keyword_score(query, &text), true),
            }
        })
        .collect();
    let outcomes: Vec<(u32, bool)> = stream::iter(futures)
        .buffered(params.max_concurrency.max(1))
        .collect()
        .await;

    let fallbacks = outcomes.iter().filter(|(_, fell_back)| *fell_back).count();
    (outcomes.into_iter().map(|(s, _)| s).collect(), fallbacks)
}

/// Filter, sort, and truncate. `scores[i]` belongs to `candidates[i]`.
pub fn select_top(candidates: &[Candidate], scores: &[u32], params: &SearchParams) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = candidates
        .iter()
        .zip(scores.iter())
        .filter(|(_, score)| **score > params.min_score)
        .map(|(c, &score)| c.with_score(score))
        .collect();

    // sort_by is stable: ties keep input order.
    kept.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    kept.truncate(params.final_limit);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::DisabledProvider;
    use crate::store::memory::InMemoryStore;
    use crate::store::Store;
    use async_trait::async_trait;
    use chrono::Utc;
    use futures::executor::block_on;
    use std::collections::HashMap;

    fn candidate(id: &str, title: &str, skills: &[&str]) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: id.to_uppercase(),
            title: title.to_string(),
            location: String::new(),
            experience: String::new(),
            phone: String::new(),
            email: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            resume: String::new(),
            match_score: None,
            avatar: None,
            created_at: Utc::now(),
        }
    }

    /// Returns fixed vectors keyed by exact text; anything else is unavailable.
    struct TableProvider {
        vectors: HashMap<String, Vec<f32>>,
    }

    #[async_trait]
    impl EmbeddingProvider for TableProvider {
        fn model_name(&self) -> &str {
            "table"
        }

        async fn embed(&self, text: &str) -> Embedding {
            match self.vectors.get(text) {
                Some(v) => Embedding::Vector(v.clone()),
                None => Embedding::Unavailable,
            }
        }
    }

    fn seeded_candidates() -> Vec<Candidate> {
        block_on(InMemoryStore::seeded().list_candidates()).unwrap()
    }

    #[test]
    fn test_keyword_scenario_java_pune() {
        let pool = seeded_candidates();
        let out = block_on(rank_candidates(
            &DisabledProvider,
            &pool,
            "Java Spring Boot 5 years Pune",
            &SearchParams::default(),
        ));
        assert_eq!(out.mode, ScoringMode::Keyword);
        let names: Vec<&str> = out.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Ananya Mehra", "Rahul Sharma", "Sneha Reddy", "Priya Patel"]
        );
        let scores: Vec<u32> = out.candidates.iter().filter_map(|c| c.match_score).collect();
        assert_eq!(scores, vec![83, 50, 50, 33]);
        assert_eq!(out.total, 4);
    }

    #[test]
    fn test_invariants_hold_for_many_queries() {
        let pool = seeded_candidates();
        let params = SearchParams::default();
        for q in [
            "java",
            "react node mongodb",
            "kubernetes docker jenkins",
            "",
            "zzz",
            "backend developer with spring experience",
        ] {
            let out = block_on(rank_candidates(&DisabledProvider, &pool, q, &params));
            assert_eq!(out.total, out.candidates.len());
            assert!(out.total <= 10);
            for c in &out.candidates {
                assert!(c.match_score.unwrap() > 20, "query {q:?}");
            }
            for pair in out.candidates.windows(2) {
                assert!(pair[0].match_score >= pair[1].match_score);
            }
        }
    }

    #[test]
    fn test_semantic_mode() {
        let pool = vec![
            candidate("a", "Alpha", &[]),
            candidate("b", "Beta", &[]),
            candidate("c", "Gamma", &[]),
        ];
        let mut vectors = HashMap::new();
        vectors.insert("query".to_string(), vec![1.0, 0.0]);
        vectors.insert(pool[0].searchable_text(), vec![0.6, 0.8]);
        vectors.insert(pool[1].searchable_text(), vec![1.0, 0.0]);
        vectors.insert(pool[2].searchable_text(), vec![0.0, 1.0]);
        let provider = TableProvider { vectors };

        let out = block_on(rank_candidates(&provider, &pool, "query", &SearchParams::default()));
        assert_eq!(out.mode, ScoringMode::Semantic);
        let ids: Vec<&str> = out.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(out.candidates[0].match_score, Some(100));
        assert_eq!(out.candidates[1].match_score, Some(60));
    }

    #[test]
    fn test_mixed_mode_falls_back_per_candidate() {
        let pool = vec![
            candidate("a", "Rust Engineer", &["Rust"]),
            candidate("b", "Go Engineer", &["Go"]),
            candidate("c", "Rust Developer", &[]),
        ];
        let mut vectors = HashMap::new();
        vectors.insert("rust engineer".to_string(), vec![1.0, 0.0, 0.0]);
        vectors.insert(pool[1].searchable_text(), vec![0.5, 0.5, 0.70710677]);
        // Wrong dimension: scored by keywords.
        vectors.insert(pool[2].searchable_text(), vec![1.0, 0.0]);
        let provider = TableProvider { vectors };

        let out = block_on(rank_candidates(
            &provider,
            &pool,
            "rust engineer",
            &SearchParams::default(),
        ));
        assert_eq!(out.mode, ScoringMode::Mixed);
        let scored: Vec<(&str, u32)> = out
            .candidates
            .iter()
            .map(|c| (c.id.as_str(), c.match_score.unwrap()))
            .collect();
        assert_eq!(scored, vec![("a", 100), ("b", 50), ("c", 50)]);
    }

    #[test]
    fn test_query_only_embedding_reports_keyword_mode() {
        let pool = seeded_candidates();
        let query = "Java Spring Boot 5 years Pune";
        let mut vectors = HashMap::new();
        vectors.insert(query.to_string(), vec![1.0, 0.0]);
        let provider = TableProvider { vectors };

        let out = block_on(rank_candidates(&provider, &pool, query, &SearchParams::default()));
        assert_eq!(out.mode, ScoringMode::Keyword);
        let scores: Vec<u32> = out.candidates.iter().filter_map(|c| c.match_score).collect();
        assert_eq!(scores, vec![83, 50, 50, 33]);
    }

    #[test]
    fn test_select_top_ties_keep_input_order_and_truncate() {
        let pool: Vec<Candidate> = (0..15)
            .map(|i| candidate(&format!("c{i}"), "t", &[]))
            .collect();
        let scores: Vec<u32> = (0..15).map(|i| if i % 2 == 0 { 70 } else { 40 }).collect();
        let top = select_top(&pool, &scores, &SearchParams::default());
        let ids: Vec<&str> = top.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["c0", "c2", "c4", "c6", "c8", "c10", "c12", "c14", "c1", "c3"]
        );
    }

    #[test]
    fn test_select_top_threshold_is_strict() {
        let pool = vec![candidate("a", "t", &[]), candidate("b", "t", &[])];
        let top = select_top(&pool, &[20, 21], &SearchParams::default());
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, "b");
    }

    #[test]
    fn test_input_not_mutated() {
        let pool = seeded_candidates();
        let before = pool.clone();
        let _ = block_on(rank_candidates(
            &DisabledProvider,
            &pool,
            "java",
            &SearchParams::default(),
        ));
        assert_eq!(pool, before);
    }
}
