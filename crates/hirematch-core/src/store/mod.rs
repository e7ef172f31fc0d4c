//! Storage abstraction for HireMatch.
//!
//! The [`Store`] trait defines every read and write the search pipeline
//! and the HTTP layer need, so backends are interchangeable. The only
//! shipped backend is [`memory::InMemoryStore`], which lives for the
//! process lifetime.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    Candidate, ChatSession, Message, NewCandidate, NewChatSession, NewMessage,
};

/// Abstract storage backend.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_candidates`](Store::list_candidates) | All candidates, insertion order |
/// | [`get_candidate`](Store::get_candidate) | One candidate by id |
/// | [`create_candidate`](Store::create_candidate) | Insert a candidate |
/// | [`filter_candidates`](Store::filter_candidates) | Substring filter over profile fields |
/// | [`list_sessions`](Store::list_sessions) | All sessions, newest first |
/// | [`get_session`](Store::get_session) | One session by id |
/// | [`create_session`](Store::create_session) | Record a search |
/// | [`list_messages`](Store::list_messages) | A session's messages, oldest first |
/// | [`create_message`](Store::create_message) | Append a message |
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_candidates(&self) -> Result<Vec<Candidate>>;

    async fn get_candidate(&self, id: &str) -> Result<Option<Candidate>>;

    /// Insert a candidate, assigning a fresh id and creation timestamp.
    async fn create_candidate(&self, candidate: NewCandidate) -> Result<Candidate>;

    /// Candidates whose title, any skill, resume, or location contains
    /// `text` (case-insensitive), ordered by stored match score descending.
    async fn filter_candidates(&self, text: &str) -> Result<Vec<Candidate>>;

    async fn list_sessions(&self) -> Result<Vec<ChatSession>>;

    async fn get_session(&self, id: &str) -> Result<Option<ChatSession>>;

    /// Record a session; `result_count` is derived from `results`.
    async fn create_session(&self, session: NewChatSession) -> Result<ChatSession>;

    async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>>;

    async fn create_message(&self, message: NewMessage) -> Result<Message>;
}
