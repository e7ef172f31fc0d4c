//! # hirematch
//!
//! **A candidate-search chat backend.**
//!
//! A recruiter types a requirement such as "Java Spring Boot 5 years Pune";
//! the service ranks an in-memory pool of candidate profiles against it and
//! keeps a history of chat sessions and messages.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐
//! │  HTTP / CLI  │──▶│ search (ranking) │──▶│ InMemoryStore │
//! └──────────────┘   └────────┬─────────┘   └──────────────┘
//!                             │
//!                             ▼
//!                  ┌─────────────────────┐
//!                  │ EmbeddingProvider   │
//!                  │ HF / OpenAI / local │
//!                  └─────────────────────┘
//! ```
//!
//! Ranking, scoring and storage live in `hirematch-core`. This crate adds
//! the runtime pieces:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration with defaults and validation |
//! | [`embedding`] | Hosted and local embedding providers |
//! | [`error`] | HTTP error schema |
//! | [`logging`] | Tracing subscriber setup |
//! | [`search`] | Store-backed search used by the CLI and the server |
//! | [`server`] | Axum router and handlers |

pub mod config;
pub mod embedding;
pub mod error;
pub mod logging;
pub mod search;
pub mod server;
