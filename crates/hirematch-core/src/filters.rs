//! Heuristic extraction of structured filters from a hiring requirement.
//!
//! Reads skills, an experience floor, a city, and a role word out of free
//! text such as `"Senior Java developer, 5+ years, Pune"`. The result is
//! returned to clients next to the ranked candidates; it does not affect
//! scoring.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Keyword → canonical skill name, checked in this order.
const SKILL_KEYWORDS: &[(&str, &str)] = &[
    ("java", "Java"),
    ("javascript", "JavaScript"),
    ("react", "React"),
    ("node", "Node.js"),
    ("python", "Python"),
    ("spring", "Spring"),
    ("aws", "AWS"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("microservices", "Microservices"),
];

const LOCATIONS: &[&str] = &["bangalore", "mumbai", "pune", "delhi", "hyderabad", "chennai"];

const TITLE_WORDS: &[&str] = &["developer", "engineer", "architect", "lead", "senior", "junior"];

static EXPERIENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*\+?\s*years?").expect("valid experience regex"));

/// Structured reading of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryFilters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl QueryFilters {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.experience.is_none()
            && self.location.is_none()
            && self.title.is_none()
    }
}

/// Extract [`QueryFilters`] from `query`.
///
/// Matching is case-insensitive substring matching, so `"javascript"`
/// yields both `Java` and `JavaScript`. When several cities or role words
/// appear, the one listed last in the lookup table wins.
pub fn parse_query_filters(query: &str) -> QueryFilters {
    let lower = query.to_lowercase();

    let skills = SKILL_KEYWORDS
        .iter()
        .filter(|(kw, _)| lower.contains(kw))
        .map(|(_, name)| name.to_string())
        .collect();

    let experience = EXPERIENCE_RE
        .captures(&lower)
        .and_then(|c| c.get(1))
        .map(|m| format!("{}+ years", m.as_str()));

    let location = LOCATIONS
        .iter()
        .filter(|loc| lower.contains(*loc))
        .last()
        .map(|loc| capitalize(loc));

    let title = TITLE_WORDS
        .iter()
        .filter(|t| lower.contains(*t))
        .last()
        .map(|t| t.to_string());

    QueryFilters {
        skills,
        experience,
        location,
        title,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_requirement() {
        let f = parse_query_filters("Senior Java Spring Boot developer, 5+ years, Pune");
        assert_eq!(f.skills, vec!["Java", "Spring"]);
        assert_eq!(f.experience.as_deref(), Some("5+ years"));
        assert_eq!(f.location.as_deref(), Some("Pune"));
        // "developer" comes before "senior" in the table; last listed wins
        assert_eq!(f.title.as_deref(), Some("senior"));
    }

    #[test]
    fn test_javascript_also_matches_java() {
        let f = parse_query_filters("javascript");
        assert_eq!(f.skills, vec!["Java", "JavaScript"]);
    }

    #[test]
    fn test_experience_variants() {
        assert_eq!(
            parse_query_filters("3 year").experience.as_deref(),
            Some("3+ years")
        );
        assert_eq!(
            parse_query_filters("10years").experience.as_deref(),
            Some("10+ years")
        );
        assert_eq!(parse_query_filters("years").experience, None);
    }

    #[test]
    fn test_empty_query() {
        let f = parse_query_filters("");
        assert!(f.is_empty());
        assert_eq!(serde_json::to_value(&f).unwrap(), serde_json::json!({}));
    }
}
