//! Hybrid retrieval: one prefetch per signal, fused by the index.


use tracing::{debug, instrument};

use crate::constants::{CAREER_VECTOR_FIELD, DESCRIPTION_VECTOR_FIELD, PREFETCH_LIMIT};
use crate::vectordb::{FusedHit, HybridSearchBackend, PrefetchSpec, VectorDbError};

/// Issues the career/profile prefetch pair against a collection.
#[derive(Debug, Clone)]
pub struct HybridRetriever<B> {
    backend: B,
    collection: String,
    prefetch_limit: u64,
}

impl<B: HybridSearchBackend> HybridRetriever<B> {
    pub fn new(backend: B, collection: impl Into<String>) -> Self {
        Self {
            backend,
            collection: collection.into(),
            prefetch_limit: PREFETCH_LIMIT,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Builds the two prefetches: career against `career_vector`, profile
    /// against `description_vector`, each over-fetching the same fixed depth.
    pub fn prefetch_specs(
        &self,
        career_vector: Vec<f32>,
        profile_vector: Vec<f32>,
    ) -> [PrefetchSpec; 2] {
        [
            PrefetchSpec::new(career_vector, CAREER_VECTOR_FIELD, self.prefetch_limit),
            PrefetchSpec::new(profile_vector, DESCRIPTION_VECTOR_FIELD, self.prefetch_limit),
        ]
    }

    /// Returns up to `limit` fused hits, best first. A non-positive limit
    /// returns nothing without querying the index.
    #[instrument(skip(self, career_vector, profile_vector), fields(collection = %self.collection))]
    pub async fn retrieve(
        &self,
        career_vector: Vec<f32>,
        profile_vector: Vec<f32>,
        limit: i64,
    ) -> Result<Vec<FusedHit>, VectorDbError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let prefetch = self.prefetch_specs(career_vector, profile_vector);
        let hits = self
            .backend
            .query_fused(&self.collection, &prefetch, limit as u64)
            .await?;

        debug!(hits = hits.len(), "Hybrid retrieval complete");
        Ok(hits)
    }
}
