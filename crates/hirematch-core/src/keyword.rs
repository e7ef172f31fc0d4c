//! Keyword similarity scoring.
//!
//! Used when no embedding is available. The query is split on whitespace
//! and each token is checked as a substring of the candidate's searchable
//! text; the score is the matched fraction scaled to `0..=100`.

/// Score `query` against already-assembled candidate `text`.
///
/// Both sides are case-folded. Returns `0.0` when the query has no tokens.
///
/// ```rust
/// use hirematch_core::keyword::keyword_similarity;
///
/// let score = keyword_similarity("java pune", "Senior Java Developer");
/// assert_eq!(score, 50.0);
/// ```
pub fn keyword_similarity(query: &str, text: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let text_lower = text.to_lowercase();
    let matches = tokens.iter().filter(|t| text_lower.contains(*t)).count();

    (matches as f64 / tokens.len() as f64 * 100.0).min(100.0)
}

/// [`keyword_similarity`] rounded to an integer match score.
pub fn keyword_score(query: &str, text: &str) -> u32 {
    keyword_similarity(query, text).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tokens_match() {
        let s = keyword_similarity("Java Spring", "java spring boot microservices");
        assert!((s - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_match() {
        let s = keyword_similarity("java python go rust", "Java and Rust");
        assert!((s - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_substring_counts() {
        // "script" is a substring of "javascript"
        assert_eq!(keyword_score("script", "JavaScript developer"), 100);
    }

    #[test]
    fn test_empty_query_is_zero() {
        assert_eq!(keyword_similarity("", "anything at all"), 0.0);
        assert_eq!(keyword_similarity("   \t ", "anything at all"), 0.0);
    }

    #[test]
    fn test_repeated_whitespace_ignored() {
        let s = keyword_similarity("java    spring", "java spring");
        assert!((s - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let q = "Java Spring Boot 5 years Pune";
        let t = "Senior Java Developer Java Spring Boot with 5 years";
        let first = keyword_similarity(q, t);
        for _ in 0..10 {
            assert_eq!(keyword_similarity(q, t), first);
        }
    }

    #[test]
    fn test_rounding() {
        // 5 of 6 tokens → 83.33…
        let q = "a b c d e z";
        assert_eq!(keyword_score(q, "a b c d e"), 83);
        // 1 of 6 → 16.67
        assert_eq!(keyword_score(q, "a"), 17);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(keyword_score("kotlin", "java developer"), 0);
    }
}
