use super::client::{HybridSearchBackend, QdrantClient};
use super::{FusedHit, PrefetchSpec, VectorDbError};
use crate::constants::MOCK_URL_PREFIX;

#[cfg(any(test, feature = "mock"))]
use super::mock::MockHybridClient;

#[derive(Clone)]
/// Index backend wrapper (real or mock).
pub enum VectorBackend {
    /// Real Qdrant-backed client.
    Qdrant(QdrantClient),
    #[cfg(any(test, feature = "mock"))]
    /// In-memory mock backend.
    Mock(MockHybridClient),
}

impl VectorBackend {
    /// Builds a backend from a URL (`mock:` URLs require the `mock` feature).
    pub fn from_config(url: &str, api_key: Option<String>) -> Result<Self, VectorDbError> {
        if url.starts_with(MOCK_URL_PREFIX) {
            #[cfg(any(test, feature = "mock"))]
            {
                let _ = api_key;
                Ok(Self::Mock(MockHybridClient::new()))
            }
            #[cfg(not(any(test, feature = "mock")))]
            {
                let _ = api_key;
                Err(VectorDbError::ConnectionFailed {
                    url: url.to_string(),
                    message: "Mock backend not enabled. Compile with --features mock".to_string(),
                })
            }
        } else {
            Ok(Self::Qdrant(QdrantClient::new(url, api_key)?))
        }
    }

    pub fn is_mock(&self) -> bool {
        !matches!(self, VectorBackend::Qdrant(_))
    }
}

impl HybridSearchBackend for VectorBackend {
    async fn is_ready(&self) -> bool {
        match self {
            VectorBackend::Qdrant(c) => c.health_check().await.is_ok(),
            #[cfg(any(test, feature = "mock"))]
            VectorBackend::Mock(c) => c.is_ready().await,
        }
    }

    async fn query_fused(
        &self,
        collection: &str,
        prefetch: &[PrefetchSpec],
        limit: u64,
    ) -> Result<Vec<FusedHit>, VectorDbError> {
        match self {
            VectorBackend::Qdrant(c) => c.query_fused(collection, prefetch, limit).await,
            #[cfg(any(test, feature = "mock"))]
            VectorBackend::Mock(c) => c.query_fused(collection, prefetch, limit).await,
        }
    }
}
