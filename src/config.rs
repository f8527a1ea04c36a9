use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the persisted record and vector tables live
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
    /// Default result limit when a request does not specify one
    pub default_limit: usize,
}

/// Configuration for the OpenAI-compatible embedding provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Base URL for the embedding API
    pub base_url: String,
    /// Model name to send in the embed request
    pub model: String,
    /// API key; when absent the vector branch is skipped entirely
    pub api_key: Option<String>,
    /// Expected embedding vector dimension (0 = don't validate)
    pub dimension: usize,
}

impl EmbeddingConfig {
    /// Whether a credential is configured. Without one the orchestrator never
    /// attempts the vector branch.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:9100".to_string(),
            embedding: EmbeddingConfig::default(),
            default_limit: 50,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
            dimension: 1536,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("STARTUP_SEARCH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("STARTUP_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("STARTUP_SEARCH_DEFAULT_LIMIT") {
            if let Ok(v) = val.parse() {
                config.default_limit = v;
            }
        }
        if let Ok(url) = std::env::var("EMBEDDING_BASE_URL") {
            config.embedding.base_url = url;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(key) = std::env::var("EMBEDDING_API_KEY") {
            if !key.is_empty() {
                config.embedding.api_key = Some(key);
            }
        }
        if let Ok(dim) = std::env::var("EMBEDDING_DIM") {
            if let Ok(d) = dim.parse() {
                config.embedding.dimension = d;
            }
        }

        config
    }
}
