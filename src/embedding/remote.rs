//! HTTP client for Jina-compatible embedding APIs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::EmbeddingConfig;
use super::error::EmbeddingError;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Clone)]
/// Remote embedder. One POST per text, no retries.
pub struct JinaEmbedder {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for JinaEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinaEmbedder")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish()
    }
}

impl JinaEmbedder {
    pub fn new(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;
        let api_key = config.api_key.ok_or_else(|| EmbeddingError::InvalidConfig {
            reason: "api_key is required for a remote provider".to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            url: config.url,
            model: config.model,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embeds a single text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), model = %self.model, "Requesting embedding");

        let request = EmbeddingRequest {
            model: &self.model,
            input: [text],
        };

        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(EmbeddingError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbeddingResponse =
            resp.json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| EmbeddingError::MalformedResponse {
                reason: "response contained no embedding".to_string(),
            })
    }
}
