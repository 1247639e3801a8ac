//! Cross-cutting, shared constants.
//!
//! The vector field names and the prefetch depth describe the layout of the
//! indexed degree collection and must match whatever populated it.

use std::time::Duration;

/// Output dimension of `jina-embeddings-v2-small-en`.
pub const DEFAULT_EMBEDDING_DIM: usize = 512;

pub const DEFAULT_EMBEDDING_URL: &str = "https://api.jina.ai/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "jina-embeddings-v2-small-en";

/// Per-call timeout for the embedding provider.
pub const EMBEDDING_TIMEOUT_SECS: u64 = 30;
pub const EMBEDDING_TIMEOUT: Duration = Duration::from_secs(EMBEDDING_TIMEOUT_SECS);

/// Named vector holding the embedded career list of each degree.
pub const CAREER_VECTOR_FIELD: &str = "career_vector";
/// Named vector holding the embedded degree description.
pub const DESCRIPTION_VECTOR_FIELD: &str = "description_vector";

/// Candidates fetched per signal before fusion. Independent of the final limit.
pub const PREFETCH_LIMIT: u64 = 20;

/// Standard RRF rank constant (`k` in `1 / (k + rank)`).
pub const RRF_RANK_CONSTANT: f32 = 60.0;

/// Number of degrees returned per submission.
pub const DEFAULT_RESULT_LIMIT: i64 = 5;

pub const DEFAULT_COLLECTION_NAME: &str = "degrees";

/// Deadline applied to a whole search request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// URL prefix selecting an in-process backend instead of a remote service.
pub const MOCK_URL_PREFIX: &str = "mock:";
