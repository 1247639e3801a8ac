//! Text embedding for the two search signals.
//!
//! - [`remote`] calls a Jina-compatible HTTP provider.
//! - [`stub`] produces deterministic vectors for tests and offline runs.
//!
//! [`EmbeddingBackend`] picks one of them from an [`EmbeddingConfig`].

/// Embedding backend configuration.
pub mod config;
mod error;
/// Jina-compatible HTTP embedder.
pub mod remote;
/// Hash-seeded stub embedder.
pub mod stub;

#[cfg(test)]
mod tests;

pub use config::EmbeddingConfig;
pub use error::EmbeddingError;
pub use remote::JinaEmbedder;
pub use stub::StubEmbedder;

use std::future::Future;

/// Turns text into a vector. Implementations must not retry.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds `text` into a single vector.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Returns `true` when vectors are synthetic.
    fn is_stub(&self) -> bool {
        false
    }
}

impl EmbeddingProvider for JinaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        JinaEmbedder::embed(self, text).await
    }
}

impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        StubEmbedder::embed(self, text)
    }

    fn is_stub(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
/// Embedder selected at startup (remote or stub).
pub enum EmbeddingBackend {
    Remote(JinaEmbedder),
    Stub(StubEmbedder),
}

impl EmbeddingBackend {
    /// Builds a backend from config (`mock:` URLs select the stub).
    pub fn from_config(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;
        if config.is_stub() {
            Ok(Self::Stub(StubEmbedder::new(config.stub_dim)))
        } else {
            Ok(Self::Remote(JinaEmbedder::new(config)?))
        }
    }
}

impl EmbeddingProvider for EmbeddingBackend {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match self {
            EmbeddingBackend::Remote(e) => e.embed(text).await,
            EmbeddingBackend::Stub(e) => e.embed(text),
        }
    }

    fn is_stub(&self) -> bool {
        matches!(self, EmbeddingBackend::Stub(_))
    }
}
