//! Application-level candidate search.
//!
//! The ranking algorithm lives in `hirematch_core::search` and operates on
//! a candidate slice. This wrapper fetches the pool from the [`Store`],
//! attaches parsed query filters, and formats CLI output. It is shared by
//! `hirematch search` and `POST /candidates/search`.

use anyhow::{bail, Result};
use serde::Serialize;

use hirematch_core::embedding::EmbeddingProvider;
use hirematch_core::filters::{parse_query_filters, QueryFilters};
use hirematch_core::models::Candidate;
use hirematch_core::search::{rank_candidates, ScoringMode, SearchParams};
use hirematch_core::store::memory::InMemoryStore;
use hirematch_core::store::Store;

use crate::config::Config;
use crate::embedding::create_provider;

/// Response body for a candidate search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Ranked copies with `matchScore` set.
    pub candidates: Vec<Candidate>,
    /// Number of candidates returned.
    pub total: usize,
    pub query: String,
    pub mode: ScoringMode,
    pub filters: QueryFilters,
    /// Set when the search was recorded as a chat session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Rank every stored candidate against `query`.
///
/// Issues no writes; callers decide whether to record a session.
pub async fn search_candidates(
    store: &dyn Store,
    provider: &dyn EmbeddingProvider,
    query: &str,
    params: &SearchParams,
) -> Result<SearchResponse> {
    if query.trim().is_empty() {
        bail!("query must not be empty");
    }

    let pool = store.list_candidates().await?;
    let ranked = rank_candidates(provider, &pool, query, params).await;

    tracing::info!(
        query,
        mode = ?ranked.mode,
        pool = pool.len(),
        total = ranked.total,
        "candidate search complete"
    );

    Ok(SearchResponse {
        candidates: ranked.candidates,
        total: ranked.total,
        query: query.to_string(),
        mode: ranked.mode,
        filters: parse_query_filters(query),
        session_id: None,
    })
}

/// CLI entry point for `hirematch search`.
pub async fn run_search(config: &Config, query: &str, json: bool) -> Result<()> {
    let store = InMemoryStore::seeded();
    let provider = create_provider(&config.embedding)?;
    let params = config.retrieval.search_params();

    let response = search_candidates(&store, provider.as_ref(), query, &params).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if !response.filters.is_empty() {
        println!("{}", format_filters(&response.filters));
        println!();
    }

    if response.candidates.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, c) in response.candidates.iter().enumerate() {
        println!(
            "{}. [{}] {} / {}",
            i + 1,
            c.match_score.unwrap_or(0),
            c.name,
            c.title
        );
        println!("    location: {}", c.location);
        println!("    experience: {}", c.experience);
        println!("    skills: {}", c.skills.join(", "));
        println!("    id: {}", c.id);
        println!();
    }
    println!(
        "{} result(s), {} scoring",
        response.total,
        match response.mode {
            ScoringMode::Semantic => "semantic",
            ScoringMode::Keyword => "keyword",
            ScoringMode::Mixed => "mixed",
        }
    );

    Ok(())
}

fn format_filters(filters: &QueryFilters) -> String {
    let mut parts = Vec::new();
    if !filters.skills.is_empty() {
        parts.push(format!("skills={}", filters.skills.join(",")));
    }
    if let Some(exp) = &filters.experience {
        parts.push(format!("experience={}", exp));
    }
    if let Some(loc) = &filters.location {
        parts.push(format!("location={}", loc));
    }
    if let Some(title) = &filters.title {
        parts.push(format!("title={}", title));
    }
    format!("filters: {}", parts.join(" "))
}

/// CLI entry point for `hirematch candidates`.
pub async fn run_list_candidates(json: bool) -> Result<()> {
    let store = InMemoryStore::seeded();
    let candidates = store.list_candidates().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    for c in &candidates {
        println!("{} | {} | {} | {}", c.name, c.title, c.location, c.experience);
    }
    Ok(())
}
