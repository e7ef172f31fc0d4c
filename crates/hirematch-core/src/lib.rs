//! # HireMatch Core
//!
//! Runtime-agnostic logic for HireMatch: data models, store abstraction,
//! keyword and vector scoring, query filter extraction, and the ranking
//! pipeline.
//!
//! This crate contains no tokio, HTTP client, or other runtime-specific
//! dependencies. Concrete embedding providers and the HTTP surface live in
//! the `hirematch` app crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Candidate, chat session, and message records |
//! | [`store`] | `Store` trait and the seeded in-memory backend |
//! | [`keyword`] | Substring-count keyword scorer |
//! | [`embedding`] | Embedding provider trait and cosine similarity |
//! | [`filters`] | Heuristic extraction of structured filters from a query |
//! | [`search`] | Ranking pipeline (embed, score, filter, sort, truncate) |

pub mod embedding;
pub mod filters;
pub mod keyword;
pub mod models;
pub mod search;
pub mod seed;
pub mod store;
