use std::time::Duration;

use crate::config::Config;
use crate::constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_URL, EMBEDDING_TIMEOUT,
    MOCK_URL_PREFIX,
};
use crate::embedding::error::EmbeddingError;

#[derive(Clone)]
/// Settings for an embedding backend.
pub struct EmbeddingConfig {
    /// Provider endpoint (`mock:` selects the stub embedder).
    pub url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Bearer token for the provider.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Output dimension of the stub embedder.
    pub stub_dim: usize,
}

impl std::fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("stub_dim", &self.stub_dim)
            .finish()
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_EMBEDDING_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            timeout: EMBEDDING_TIMEOUT,
            stub_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl EmbeddingConfig {
    /// Remote provider config with the default model and timeout.
    pub fn remote(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Deterministic stub config (no network).
    pub fn stub() -> Self {
        Self {
            url: MOCK_URL_PREFIX.to_string(),
            ..Default::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            url: config.embedding_url.clone(),
            model: config.embedding_model.clone(),
            api_key: config.embedding_api_key.clone(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_stub_dim(mut self, dim: usize) -> Self {
        self.stub_dim = dim;
        self
    }

    /// Returns `true` if this config selects the stub embedder.
    pub fn is_stub(&self) -> bool {
        self.url.starts_with(MOCK_URL_PREFIX)
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.is_stub() {
            if self.stub_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "stub_dim must be greater than zero".to_string(),
                });
            }
            return Ok(());
        }

        if self.model.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model must not be empty".to_string(),
            });
        }
        if self.api_key.is_none() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "api_key is required for a remote provider".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
