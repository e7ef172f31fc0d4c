//! Embedding provider implementations.
//!
//! Implements [`EmbeddingProvider`] from `hirematch-core`:
//! - **[`DisabledProvider`]**: never returns vectors (keyword-only search).
//! - **[`HuggingFaceProvider`]**: calls the hosted inference API for a
//!   sentence-transformers model.
//! - **[`OpenAIProvider`]**: calls the OpenAI `/v1/embeddings` endpoint.
//! - **`LocalProvider`**: runs the model in-process via fastembed
//!   (feature `local-embeddings`).
//!
//! # Failure Handling
//!
//! Providers do not retry. A missing credential, transport error, non-2xx
//! status, timeout, or unrecognized response body is logged and reported as
//! [`Embedding::Unavailable`]; the ranking pipeline then scores by keywords.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde_json::Value;

pub use hirematch_core::embedding::{DisabledProvider, Embedding, EmbeddingProvider};

use crate::config::EmbeddingConfig;

const HF_DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
const HF_API_BASE: &str = "https://api-inference.huggingface.co/models";
const HF_KEY_VARS: &[&str] = &["HUGGING_FACE_API_KEY", "HF_API_KEY"];

const OPENAI_DEFAULT_MODEL: &str = "text-embedding-3-small";
const OPENAI_DEFAULT_URL: &str = "https://api.openai.com/v1/embeddings";
const OPENAI_KEY_VARS: &[&str] = &["OPENAI_API_KEY"];

/// Read the first non-empty credential among `vars`.
fn resolve_api_key(config: &EmbeddingConfig, defaults: &[&str]) -> Option<String> {
    let vars: Vec<&str> = match &config.api_key_env {
        Some(name) => vec![name.as_str()],
        None => defaults.to_vec(),
    };
    vars.into_iter()
        .filter_map(|v| std::env::var(v).ok())
        .find(|k| !k.trim().is_empty())
}

fn http_client(config: &EmbeddingConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

/// Convert a provider call result into the capability type.
fn into_embedding(provider: &str, result: Result<Vec<f32>>) -> Embedding {
    match result {
        Ok(v) if !v.is_empty() => Embedding::Vector(v),
        Ok(_) => {
            tracing::warn!(provider, "embedding response was an empty vector");
            Embedding::Unavailable
        }
        Err(err) => {
            tracing::warn!(provider, error = %err, "embedding request failed");
            Embedding::Unavailable
        }
    }
}

/// Collect a JSON array of numbers into a vector; any non-number is an error.
fn numeric_array(values: &[Value]) -> Result<Vec<f32>> {
    values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|n| n as f32)
                .ok_or_else(|| anyhow!("embedding value must be numeric"))
        })
        .collect()
}

// ============ Hugging Face Provider ============

/// Embedding provider using the Hugging Face inference API.
///
/// Sends `{"inputs": text, "options": {"wait_for_model": true}}` with a
/// bearer token read from `HUGGING_FACE_API_KEY` or `HF_API_KEY` (or the
/// variable named by `embedding.api_key_env`).
pub struct HuggingFaceProvider {
    model: String,
    url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| HF_DEFAULT_MODEL.to_string());
        let url = config
            .url
            .clone()
            .unwrap_or_else(|| format!("{}/{}", HF_API_BASE, model));
        Ok(Self {
            model,
            url,
            api_key: resolve_api_key(config, HF_KEY_VARS),
            client: http_client(config)?,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(&self, api_key: &str, text: &str) -> Result<Vec<f32>> {
        let body = serde_json::json!({
            "inputs": text,
            "options": { "wait_for_model": true },
        });

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Hugging Face API error {}: {}", status, body_text);
        }

        let json: Value = response.json().await?;
        parse_huggingface_response(&json)
    }
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Embedding {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("no Hugging Face credential, embedding unavailable");
            return Embedding::Unavailable;
        };
        into_embedding("huggingface", self.request(api_key, text).await)
    }
}

/// Parse a feature-extraction response.
///
/// Accepts a flat array of numbers or a nested array whose first element
/// is the vector.
pub fn parse_huggingface_response(json: &Value) -> Result<Vec<f32>> {
    let outer = json
        .as_array()
        .ok_or_else(|| anyhow!("Invalid Hugging Face response: expected an array"))?;

    match outer.first() {
        Some(Value::Array(inner)) => numeric_array(inner),
        Some(_) => numeric_array(outer),
        None => bail!("Invalid Hugging Face response: empty array"),
    }
}

// ============ OpenAI Provider ============

/// Embedding provider using the OpenAI embeddings API.
///
/// Requires `OPENAI_API_KEY` (or the variable named by
/// `embedding.api_key_env`).
pub struct OpenAIProvider {
    model: String,
    url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        Ok(Self {
            model: config
                .model
                .clone()
                .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
            url: config
                .url
                .clone()
                .unwrap_or_else(|| OPENAI_DEFAULT_URL.to_string()),
            api_key: resolve_api_key(config, OPENAI_KEY_VARS),
            client: http_client(config)?,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(&self, api_key: &str, text: &str) -> Result<Vec<f32>> {
        let body = serde_json::json!({
            "model": self.model,
            "input": [text],
        });

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("OpenAI API error {}: {}", status, body_text);
        }

        let json: Value = response.json().await?;
        parse_openai_response(&json)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Embedding {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("no OpenAI credential, embedding unavailable");
            return Embedding::Unavailable;
        };
        into_embedding("openai", self.request(api_key, text).await)
    }
}

/// Extract `data[0].embedding` from an OpenAI embeddings response.
pub fn parse_openai_response(json: &Value) -> Result<Vec<f32>> {
    let embedding = json
        .get("data")
        .and_then(|d| d.as_array())
        .and_then(|d| d.first())
        .and_then(|item| item.get("embedding"))
        .and_then(|e| e.as_array())
        .ok_or_else(|| anyhow!("Invalid OpenAI response: missing data[0].embedding"))?;
    numeric_array(embedding)
}

// ============ Local Provider (fastembed) ============

/// In-process embedding provider backed by fastembed.
///
/// The model is downloaded on first use and kept loaded for the life of
/// the provider. Inference runs on the blocking thread pool.
#[cfg(feature = "local-embeddings")]
pub struct LocalProvider {
    model_name: String,
    model: fastembed::EmbeddingModel,
    loaded: Arc<std::sync::Mutex<Option<fastembed::TextEmbedding>>>,
}

#[cfg(feature = "local-embeddings")]
impl LocalProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model_name = config
            .model
            .clone()
            .unwrap_or_else(|| "all-minilm-l6-v2".to_string());
        let model = match model_name.as_str() {
            "all-minilm-l6-v2" => fastembed::EmbeddingModel::AllMiniLML6V2,
            "bge-small-en-v1.5" => fastembed::EmbeddingModel::BGESmallENV15,
            "bge-base-en-v1.5" => fastembed::EmbeddingModel::BGEBaseENV15,
            "nomic-embed-text-v1.5" => fastembed::EmbeddingModel::NomicEmbedTextV15,
            other => bail!(
                "Unknown local embedding model: '{}'. Supported models: \
                 all-minilm-l6-v2, bge-small-en-v1.5, bge-base-en-v1.5, nomic-embed-text-v1.5",
                other
            ),
        };
        Ok(Self {
            model_name,
            model,
            loaded: Arc::new(std::sync::Mutex::new(None)),
        })
    }
}

#[cfg(feature = "local-embeddings")]
#[async_trait]
impl EmbeddingProvider for LocalProvider {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn embed(&self, text: &str) -> Embedding {
        let loaded = Arc::clone(&self.loaded);
        let model = self.model.clone();
        let text = text.to_string();

        let result = tokio::task::spawn_blocking(move || -> Result<Vec<f32>> {
            let mut guard = loaded
                .lock()
                .map_err(|_| anyhow!("local embedding model lock poisoned"))?;
            if guard.is_none() {
                let init = fastembed::InitOptions::new(model).with_show_download_progress(false);
                let embedder = fastembed::TextEmbedding::try_new(init)
                    .map_err(|e| anyhow!("Failed to initialize local embedding model: {}", e))?;
                *guard = Some(embedder);
            }
            let embedder = guard
                .as_mut()
                .ok_or_else(|| anyhow!("local embedding model not loaded"))?;
            let mut vectors = embedder
                .embed(vec![text], None)
                .map_err(|e| anyhow!("Local embedding failed: {}", e))?;
            vectors
                .pop()
                .ok_or_else(|| anyhow!("Local embedding returned no vectors"))
        })
        .await
        .map_err(anyhow::Error::from)
        .and_then(|r| r);

        into_embedding("local", result)
    }
}

/// Create the appropriate [`EmbeddingProvider`] based on configuration.
///
/// | Config Value | Provider |
/// |-------------|----------|
/// | `"disabled"` | [`DisabledProvider`] |
/// | `"huggingface"` | [`HuggingFaceProvider`] |
/// | `"openai"` | [`OpenAIProvider`] |
/// | `"local"` | `LocalProvider` (requires feature `local-embeddings`) |
///
/// A hosted provider without a credential is still returned; it reports
/// every embedding as unavailable, so search runs in keyword mode.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    if !config.is_enabled() {
        return Ok(Arc::new(DisabledProvider));
    }
    match config.provider.as_str() {
        "huggingface" => {
            let provider = HuggingFaceProvider::new(config)?;
            if !provider.has_credential() {
                tracing::warn!("no Hugging Face API key set, falling back to keyword matching");
            }
            Ok(Arc::new(provider))
        }
        "openai" => {
            let provider = OpenAIProvider::new(config)?;
            if !provider.has_credential() {
                tracing::warn!("no OpenAI API key set, falling back to keyword matching");
            }
            Ok(Arc::new(provider))
        }
        #[cfg(feature = "local-embeddings")]
        "local" => Ok(Arc::new(LocalProvider::new(config)?)),
        #[cfg(not(feature = "local-embeddings"))]
        "local" => bail!("Local embedding provider requires --features local-embeddings"),
        other => bail!("Unknown embedding provider: {}", other),
    }
}
