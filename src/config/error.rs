//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A required environment variable was not set.
    ///
    /// Only raised for settings without a usable default, such as the
    /// embedding provider key when a remote provider is configured.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// Result limit must allow at least one recommendation.
    #[error("invalid result limit {value}: must be at least 1")]
    InvalidResultLimit { value: i64 },

    /// Request deadline of zero would reject every search.
    #[error("invalid request timeout: must be greater than zero seconds")]
    InvalidTimeout,

    /// Collection name was set to an empty string.
    #[error("collection name must not be empty")]
    EmptyCollectionName,
}
