//! HTTP server.
//!
//! Exposes the candidate store, ranked search, and chat history as a JSON
//! API for the chat frontend. Every route is mounted both at the root and
//! under `/api`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (version, embedding model) |
//! | `GET`  | `/candidates` | All candidates; `?q=` filters by substring |
//! | `POST` | `/candidates` | Create a candidate |
//! | `GET`  | `/candidates/{id}` | One candidate |
//! | `POST` | `/candidates/search` | Ranked search |
//! | `GET`  | `/chat/sessions` | Sessions, newest first |
//! | `POST` | `/chat/sessions` | Record a session |
//! | `GET`  | `/chat/sessions/{id}` | One session |
//! | `GET`  | `/chat/sessions/{id}/messages` | A session's messages, oldest first |
//! | `POST` | `/chat/messages` | Append a message |
//!
//! Errors follow the schema in [`crate::error`].
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a browser frontend
//! on another port can call the API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use hirematch_core::embedding::EmbeddingProvider;
use hirematch_core::models::{
    Candidate, ChatSession, Message, MessageRole, NewCandidate, NewChatSession, NewMessage,
};
use hirematch_core::search::SearchParams;
use hirematch_core::store::memory::InMemoryStore;
use hirematch_core::store::Store;

use crate::config::Config;
use crate::embedding::create_provider;
use crate::error::ApiError;
use crate::search::{search_candidates, SearchResponse};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
///
/// Constructed once at startup; the store is the single process-lifetime
/// instance.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub provider: Arc<dyn EmbeddingProvider>,
    pub params: SearchParams,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        provider: Arc<dyn EmbeddingProvider>,
        params: SearchParams,
    ) -> Self {
        Self {
            store,
            provider,
            params,
        }
    }

    /// Seeded in-memory store plus the configured embedding provider.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            Arc::new(InMemoryStore::seeded()),
            create_provider(&config.embedding)?,
            config.retrieval.search_params(),
        ))
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .merge(api_routes())
        .nest("/api", api_routes())
        .layer(cors)
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/candidates",
            get(handle_list_candidates).post(handle_create_candidate),
        )
        .route("/candidates/search", post(handle_search))
        .route("/candidates/{id}", get(handle_get_candidate))
        .route(
            "/chat/sessions",
            get(handle_list_sessions).post(handle_create_session),
        )
        .route("/chat/sessions/{id}", get(handle_get_session))
        .route("/chat/sessions/{id}/messages", get(handle_list_messages))
        .route("/chat/messages", post(handle_create_message))
}

/// Starts the HTTP server on `[server].bind` and runs until the process exits.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        bind = %config.server.bind,
        provider = %config.embedding.provider,
        "HTTP server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    embeddings: String,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        embeddings: state.provider.model_name().to_string(),
    })
}

// ============ Candidates ============

#[derive(Deserialize)]
struct CandidateListQuery {
    q: Option<String>,
}

async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<CandidateListQuery>,
) -> Result<Json<Vec<Candidate>>, ApiError> {
    let candidates = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => state.store.filter_candidates(q).await?,
        _ => state.store.list_candidates().await?,
    };
    Ok(Json(candidates))
}

async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, ApiError> {
    state
        .store
        .get_candidate(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Candidate not found"))
}

async fn handle_create_candidate(
    State(state): State<AppState>,
    payload: Result<Json<NewCandidate>, JsonRejection>,
) -> Result<Json<Candidate>, ApiError> {
    let Json(new) = payload?;
    if new.name.trim().is_empty() {
        return Err(ApiError::bad_request("name must not be empty"));
    }
    if new.title.trim().is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }
    if new.match_score.is_some_and(|s| s > 100) {
        return Err(ApiError::bad_request("matchScore must be in [0, 100]"));
    }

    let created = state.store.create_candidate(new).await?;
    tracing::info!(id = %created.id, name = %created.name, "candidate created");
    Ok(Json(created))
}

// ============ POST /candidates/search ============

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody {
    query: String,
    /// Also record the result as a chat session.
    #[serde(default)]
    record_session: bool,
}

async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(body) = payload?;
    if body.query.trim().is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }

    let mut response = search_candidates(
        state.store.as_ref(),
        state.provider.as_ref(),
        &body.query,
        &state.params,
    )
    .await?;

    if body.record_session {
        let session = state
            .store
            .create_session(NewChatSession {
                query: body.query,
                results: response.candidates.iter().map(|c| c.id.clone()).collect(),
            })
            .await?;
        response.session_id = Some(session.id);
    }

    Ok(Json(response))
}

// ============ Chat sessions ============

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionBody {
    query: String,
    #[serde(default)]
    result_count: Option<usize>,
    results: Vec<String>,
}

async fn handle_list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSession>>, ApiError> {
    Ok(Json(state.store.list_sessions().await?))
}

async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatSession>, ApiError> {
    state
        .store
        .get_session(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Chat session not found"))
}

async fn handle_create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionBody>, JsonRejection>,
) -> Result<Json<ChatSession>, ApiError> {
    let Json(body) = payload?;
    if body.query.trim().is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }
    if let Some(count) = body.result_count {
        if count != body.results.len() {
            return Err(ApiError::bad_request(format!(
                "resultCount ({}) must equal the number of results ({})",
                count,
                body.results.len()
            )));
        }
    }

    let session = state
        .store
        .create_session(NewChatSession {
            query: body.query,
            results: body.results,
        })
        .await?;
    Ok(Json(session))
}

// ============ Messages ============

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessageBody {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(rename = "type")]
    role: MessageRole,
    content: String,
}

async fn handle_list_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.store.list_messages(&session_id).await?))
}

async fn handle_create_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageBody>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Json(body) = payload?;
    if body.content.is_empty() {
        return Err(ApiError::bad_request("content must not be empty"));
    }

    let message = state
        .store
        .create_message(NewMessage {
            session_id: body.session_id,
            role: body.role,
            content: body.content,
        })
        .await?;
    Ok(Json(message))
}
