//! HTTP client helpers for tests.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub message: String,
    pub request: RequestEcho,
    pub data: Vec<Degree>,
}

#[derive(Debug, Deserialize)]
pub struct RequestEcho {
    pub selected_career: String,
    pub user_profile: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct Degree {
    pub degree_title: String,
    pub careers: Vec<String>,
    pub degree_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub fn raw(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn search(&self, body: &Value) -> Result<SearchResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/api/search"))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        match resp.status().as_u16() {
            201 => Ok(resp.json().await?),
            400 => Err(TestClientError::BadRequest(resp.json().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn search_raw(&self, body: impl Into<reqwest::Body>) -> reqwest::Response {
        self.client
            .post(self.url("/api/search"))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("request should reach the server")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bad request: {0:?}")]
    BadRequest(ErrorBody),

    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}
