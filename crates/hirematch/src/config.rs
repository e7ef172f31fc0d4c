//! TOML configuration.
//!
//! Every section is optional. A missing `--config` path means
//! [`Config::default`].
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:5000"
//!
//! [embedding]
//! provider = "huggingface"       # huggingface | openai | local | disabled
//! model = "sentence-transformers/all-MiniLM-L6-v2"
//! timeout_secs = 10
//!
//! [retrieval]
//! min_score = 20
//! final_limit = 10
//! max_concurrency = 8
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{bail, Context, Result};
use hirematch_core::search::SearchParams;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model id; each provider has its own default.
    #[serde(default)]
    pub model: Option<String>,
    /// Endpoint override for hosted providers.
    #[serde(default)]
    pub url: Option<String>,
    /// Name of the environment variable holding the bearer credential.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            url: None,
            api_key_env: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_provider() -> String {
    "huggingface".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl EmbeddingConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default = "default_final_limit")]
    pub final_limit: usize,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            final_limit: default_final_limit(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_min_score() -> u32 {
    20
}
fn default_final_limit() -> usize {
    10
}
fn default_max_concurrency() -> usize {
    8
}

impl RetrievalConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            min_score: self.min_score,
            final_limit: self.final_limit,
            max_concurrency: self.max_concurrency,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// [`load_config`] when a path is given, defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.retrieval.min_score > 100 {
        bail!("retrieval.min_score must be in [0, 100]");
    }
    if config.retrieval.final_limit < 1 {
        bail!("retrieval.final_limit must be >= 1");
    }
    if config.retrieval.max_concurrency < 1 {
        bail!("retrieval.max_concurrency must be >= 1");
    }
    if config.embedding.timeout_secs == 0 {
        bail!("embedding.timeout_secs must be > 0");
    }

    match config.embedding.provider.as_str() {
        "disabled" | "huggingface" | "openai" | "local" => {}
        other => bail!(
            "Unknown embedding provider: '{}'. Must be disabled, huggingface, openai, or local.",
            other
        ),
    }

    Ok(())
}
