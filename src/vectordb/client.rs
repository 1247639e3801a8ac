use std::future::Future;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{Fusion, PrefetchQueryBuilder, Query, QueryPoints, QueryPointsBuilder};
use tracing::debug;

use super::error::VectorDbError;
use super::model::{FusedHit, PrefetchSpec};

#[derive(Clone)]
/// Direct Qdrant client wrapper.
pub struct QdrantClient {
    client: Qdrant,
    url: String,
}

impl QdrantClient {
    /// Creates a client for `url`, authenticating with `api_key` when given.
    pub fn new(url: &str, api_key: Option<String>) -> Result<Self, VectorDbError> {
        let client = Qdrant::from_url(url).api_key(api_key).build().map_err(|e| {
            VectorDbError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Returns `true` if the collection exists.
    pub async fn collection_exists(&self, name: &str) -> Result<bool, VectorDbError> {
        self.client
            .collection_exists(name)
            .await
            .map_err(|e| VectorDbError::QueryFailed {
                collection: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Runs the prefetches server-side and fuses them with RRF.
    ///
    /// The rank constant is whatever the server applies by default.
    pub async fn query_fused(
        &self,
        collection: &str,
        prefetch: &[PrefetchSpec],
        limit: u64,
    ) -> Result<Vec<FusedHit>, VectorDbError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let query = build_fused_query(collection, prefetch, limit);

        let response =
            self.client
                .query(query)
                .await
                .map_err(|e| VectorDbError::QueryFailed {
                    collection: collection.to_string(),
                    message: e.to_string(),
                })?;

        debug!(
            collection,
            hits = response.result.len(),
            "Fused query returned"
        );

        Ok(response
            .result
            .into_iter()
            .filter_map(FusedHit::from_scored_point)
            .collect())
    }
}

/// Builds the Query API request: one nearest-neighbour prefetch per spec,
/// fused with RRF, payload included.
pub fn build_fused_query(collection: &str, prefetch: &[PrefetchSpec], limit: u64) -> QueryPoints {
    let mut query = QueryPointsBuilder::new(collection)
        .query(Query::new_fusion(Fusion::Rrf))
        .limit(limit)
        .with_payload(true);

    for spec in prefetch {
        query = query.add_prefetch(
            PrefetchQueryBuilder::default()
                .query(Query::new_nearest(spec.vector.clone()))
                .using(spec.field_name.clone())
                .limit(spec.limit),
        );
    }

    query.build()
}

/// Index operations needed by the hybrid retriever.
pub trait HybridSearchBackend: Send + Sync {
    /// Returns `true` if the index is reachable.
    fn is_ready(&self) -> impl Future<Output = bool> + Send;

    /// Runs every prefetch, fuses with RRF and returns the top `limit` hits
    /// with payload attached.
    fn query_fused(
        &self,
        collection: &str,
        prefetch: &[PrefetchSpec],
        limit: u64,
    ) -> impl Future<Output = Result<Vec<FusedHit>, VectorDbError>> + Send;
}

impl HybridSearchBackend for QdrantClient {
    async fn is_ready(&self) -> bool {
        self.health_check().await.is_ok()
    }

    async fn query_fused(
        &self,
        collection: &str,
        prefetch: &[PrefetchSpec],
        limit: u64,
    ) -> Result<Vec<FusedHit>, VectorDbError> {
        QdrantClient::query_fused(self, collection, prefetch, limit).await
    }
}
