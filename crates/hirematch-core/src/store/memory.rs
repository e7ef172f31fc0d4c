//! In-memory [`Store`] implementation.
//!
//! Records live in `Vec`s behind `std::sync::RwLock`, so insertion order is
//! also creation order. Candidates additionally get a `HashMap` id index.
//! Nothing is evicted; sessions and messages accumulate for the lifetime
//! of the process.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    Candidate, ChatSession, Message, NewCandidate, NewChatSession, NewMessage,
};
use crate::seed::sample_candidates;

use super::Store;

#[derive(Default)]
struct Candidates {
    rows: Vec<Candidate>,
    by_id: HashMap<String, usize>,
}

/// Process-lifetime store.
pub struct InMemoryStore {
    candidates: RwLock<Candidates>,
    sessions: RwLock<Vec<ChatSession>>,
    messages: RwLock<Vec<Message>>,
}

impl InMemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            candidates: RwLock::new(Candidates::default()),
            sessions: RwLock::new(Vec::new()),
            messages: RwLock::new(Vec::new()),
        }
    }

    /// A store pre-loaded with [`sample_candidates`].
    pub fn seeded() -> Self {
        let mut rows = Candidates::default();
        for candidate in sample_candidates() {
            rows.push(build_candidate(candidate));
        }
        Self {
            candidates: RwLock::new(rows),
            sessions: RwLock::new(Vec::new()),
            messages: RwLock::new(Vec::new()),
        }
    }
}

impl Candidates {
    fn push(&mut self, candidate: Candidate) {
        self.by_id.insert(candidate.id.clone(), self.rows.len());
        self.rows.push(candidate);
    }
}

/// Assign an id and creation time to `new`.
fn build_candidate(new: NewCandidate) -> Candidate {
    Candidate {
        id: Uuid::new_v4().to_string(),
        name: new.name,
        title: new.title,
        location: new.location,
        experience: new.experience,
        phone: new.phone,
        email: new.email,
        skills: new.skills,
        resume: new.resume,
        match_score: new.match_score.map(|s| s.min(100)),
        avatar: new.avatar.filter(|a| !a.is_empty()),
        created_at: Utc::now(),
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| anyhow!("in-memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| anyhow!("in-memory store lock poisoned"))
}

fn matches_text(candidate: &Candidate, needle: &str) -> bool {
    candidate.title.to_lowercase().contains(needle)
        || candidate
            .skills
            .iter()
            .any(|s| s.to_lowercase().contains(needle))
        || candidate.resume.to_lowercase().contains(needle)
        || candidate.location.to_lowercase().contains(needle)
}

#[async_trait]
impl Store for InMemoryStore {
    async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        Ok(read(&self.candidates)?.rows.clone())
    }

    async fn get_candidate(&self, id: &str) -> Result<Option<Candidate>> {
        let guard = read(&self.candidates)?;
        Ok(guard.by_id.get(id).map(|&i| guard.rows[i].clone()))
    }

    async fn create_candidate(&self, candidate: NewCandidate) -> Result<Candidate> {
        let created = build_candidate(candidate);
        write(&self.candidates)?.push(created.clone());
        Ok(created)
    }

    async fn filter_candidates(&self, text: &str) -> Result<Vec<Candidate>> {
        let needle = text.to_lowercase();
        let mut found: Vec<Candidate> = read(&self.candidates)?
            .rows
            .iter()
            .filter(|c| matches_text(c, &needle))
            .cloned()
            .collect();
        found.sort_by_key(|c| std::cmp::Reverse(c.match_score.unwrap_or(0)));
        Ok(found)
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>> {
        Ok(read(&self.sessions)?.iter().rev().cloned().collect())
    }

    async fn get_session(&self, id: &str) -> Result<Option<ChatSession>> {
        Ok(read(&self.sessions)?.iter().find(|s| s.id == id).cloned())
    }

    async fn create_session(&self, session: NewChatSession) -> Result<ChatSession> {
        let mut guard = write(&self.sessions)?;
        let created = ChatSession {
            id: Uuid::new_v4().to_string(),
            query: session.query,
            result_count: session.results.len(),
            results: session.results,
            created_at: Utc::now(),
        };
        guard.push(created.clone());
        Ok(created)
    }

    async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        Ok(read(&self.messages)?
            .iter()
            .filter(|m| m.session_id.as_deref() == Some(session_id))
            .cloned()
            .collect())
    }

    async fn create_message(&self, message: NewMessage) -> Result<Message> {
        let mut guard = write(&self.messages)?;
        let created = Message {
            id: Uuid::new_v4().to_string(),
            session_id: message.session_id.filter(|s| !s.is_empty()),
            role: message.role,
            content: message.content,
            created_at: Utc::now(),
        };
        guard.push(created.clone());
        Ok(created)
    }
}
