use std::time::Duration;

use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::profile::ProfileError;
use crate::recommend::FormatError;
use crate::vectordb::VectorDbError;

/// Everything that can abort a search. No variant carries partial results.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Request fields missing or of the wrong type.
    #[error("{0}")]
    MalformedInput(#[from] ProfileError),

    /// Embedding provider failed or answered with an unexpected shape.
    #[error("{0}")]
    EmbeddingProvider(#[from] EmbeddingError),

    /// Vector index call failed.
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] VectorDbError),

    /// A stored degree record is missing required fields.
    #[error("{0}")]
    MalformedPayload(#[from] FormatError),

    /// The request deadline elapsed.
    #[error("search timed out after {0:?}")]
    Timeout(Duration),
}

impl SearchError {
    /// Returns `true` for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::MalformedInput(_))
    }
}
