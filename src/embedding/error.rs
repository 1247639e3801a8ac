use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Provider answered with a non-success status.
    #[error("embedding provider error: {status} - {message}")]
    Provider { status: u16, message: String },

    /// Provider answered 2xx but without a usable vector.
    #[error("malformed embedding response: {reason}")]
    MalformedResponse { reason: String },

    /// Request never produced a response (connect failure, timeout, ...).
    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("invalid embedding configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            format!("timed out: {}", err)
        } else {
            err.to_string()
        };
        EmbeddingError::RequestFailed { reason }
    }
}
