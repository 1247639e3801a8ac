//! Environment-backed configuration.
//!
//! Most settings have defaults. The Qdrant and embedding provider variables keep
//! the names used by the deployment (`QDRANT_URL`, `JINA_API_KEY`, ...); server
//! settings use the `DEGREE_SEARCH_*` prefix.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_COLLECTION_NAME, DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_LIMIT, MOCK_URL_PREFIX,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults, then
/// [`Config::validate`] before building any client from it.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Qdrant API key, if the cluster requires one.
    pub qdrant_api_key: Option<String>,

    /// Collection holding the degree records. Default: `degrees`.
    pub collection_name: String,

    /// Embedding provider endpoint. Default: the Jina embeddings API.
    pub embedding_url: String,

    /// Embedding model identifier sent with every request.
    pub embedding_model: String,

    /// Bearer token for the embedding provider.
    pub embedding_api_key: Option<String>,

    /// Degrees returned per submission. Default: `5`.
    pub result_limit: i64,

    /// Deadline for a whole search request, in seconds. Default: `60`.
    pub request_timeout_secs: u64,
}

/// Default Qdrant URL used when `QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            qdrant_api_key: None,
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_api_key: None,
            result_limit: DEFAULT_RESULT_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "DEGREE_SEARCH_PORT";
    const ENV_BIND_ADDR: &'static str = "DEGREE_SEARCH_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "QDRANT_URL";
    const ENV_QDRANT_API_KEY: &'static str = "QDRANT_API_KEY";
    const ENV_COLLECTION_NAME: &'static str = "COLLECTION_NAME";
    const ENV_EMBEDDING_URL: &'static str = "EMBEDDING_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "EMBEDDING_MODEL";
    const ENV_EMBEDDING_API_KEY: &'static str = "JINA_API_KEY";
    const ENV_RESULT_LIMIT: &'static str = "DEGREE_SEARCH_RESULT_LIMIT";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "DEGREE_SEARCH_REQUEST_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let qdrant_api_key = Self::parse_optional_string_from_env(Self::ENV_QDRANT_API_KEY);
        let collection_name =
            Self::parse_string_from_env(Self::ENV_COLLECTION_NAME, defaults.collection_name);
        let embedding_url =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_URL, defaults.embedding_url);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let result_limit = Self::parse_i64_from_env(Self::ENV_RESULT_LIMIT, defaults.result_limit);
        let request_timeout_secs = Self::parse_u64_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout_secs,
        );

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            qdrant_api_key,
            collection_name,
            embedding_url,
            embedding_model,
            embedding_api_key,
            result_limit,
            request_timeout_secs,
        })
    }

    /// Validates basic invariants (does not contact any service).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection_name.trim().is_empty() {
            return Err(ConfigError::EmptyCollectionName);
        }

        if self.result_limit < 1 {
            return Err(ConfigError::InvalidResultLimit {
                value: self.result_limit,
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        if !self.uses_stub_embedder() && self.embedding_api_key.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_EMBEDDING_API_KEY,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Whole-request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns `true` when the embedding URL selects the deterministic stub.
    pub fn uses_stub_embedder(&self) -> bool {
        self.embedding_url.starts_with(MOCK_URL_PREFIX)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_i64_from_env(var_name: &str, default: i64) -> i64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
