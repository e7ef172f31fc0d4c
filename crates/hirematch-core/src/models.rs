//! Core data models used throughout HireMatch.
//!
//! Records are serialized with camelCase field names so the JSON shape
//! matches what the chat frontend expects (`matchScore`, `createdAt`,
//! `resultCount`, `sessionId`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate profile in the search pool.
///
/// Stored records are never mutated. The ranking pipeline returns copies
/// with [`match_score`](Candidate::match_score) set for the current query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub title: String,
    pub location: String,
    /// Free-text experience, e.g. `"5 years"`.
    pub experience: String,
    pub phone: String,
    pub email: String,
    pub skills: Vec<String>,
    pub resume: String,
    /// Relevance in `[0, 100]` for a specific query.
    pub match_score: Option<u32>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    /// Text the scorers look at: title, skills, and resume joined by spaces.
    ///
    /// Location, contact details, and experience are not scored.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.skills.join(" "), self.resume)
    }

    /// Returns a copy of this candidate carrying `score`.
    pub fn with_score(&self, score: u32) -> Self {
        Self {
            match_score: Some(score.min(100)),
            ..self.clone()
        }
    }
}

/// Fields supplied when creating a candidate. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub match_score: Option<u32>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One search, recorded for the chat history sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub query: String,
    /// Candidate ids in ranked order, as returned at creation time.
    pub results: Vec<String>,
    /// Always equal to `results.len()`.
    pub result_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a chat session.
#[derive(Debug, Clone)]
pub struct NewChatSession {
    pub query: String,
    pub results: Vec<String>,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// Owning session. Not checked against existing sessions.
    pub session_id: Option<String>,
    #[serde(rename = "type")]
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub session_id: Option<String>,
    pub role: MessageRole,
    pub content: String,
}
