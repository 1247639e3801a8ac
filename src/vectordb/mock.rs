use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::fusion::reciprocal_rank_fusion;
use super::{FusedHit, HitId, HybridSearchBackend, Payload, PrefetchSpec, ScoredHit, VectorDbError};
use crate::constants::RRF_RANK_CONSTANT;

/// In-memory stand-in for a Qdrant collection with named vectors.
///
/// Prefetches are exact cosine kNN per field; fusion is the in-process RRF.
/// Clones share state.
#[derive(Clone, Default)]
pub struct MockHybridClient {
    collections: Arc<RwLock<HashMap<String, MockCollection>>>,
    queries: Arc<AtomicUsize>,
    unavailable: Arc<RwLock<Option<String>>>,
}

#[derive(Default)]
struct MockCollection {
    vector_sizes: HashMap<String, usize>,
    points: BTreeMap<HitId, MockPoint>,
}

#[derive(Debug, Clone)]
/// A stored point: named vectors plus payload.
pub struct MockPoint {
    pub id: HitId,
    pub vectors: HashMap<String, Vec<f32>>,
    pub payload: Payload,
}

impl MockPoint {
    pub fn new(id: impl Into<HitId>, payload: Payload) -> Self {
        Self {
            id: id.into(),
            vectors: HashMap::new(),
            payload,
        }
    }

    pub fn with_vector(mut self, field: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(field.into(), vector);
        self
    }
}

impl MockHybridClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or replaces) a collection with the given named vector fields.
    pub fn create_collection(&self, name: &str, fields: &[(&str, usize)]) {
        let mut collections = match self.collections.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        collections.insert(
            name.to_string(),
            MockCollection {
                vector_sizes: fields
                    .iter()
                    .map(|(field, size)| (field.to_string(), *size))
                    .collect(),
                points: BTreeMap::new(),
            },
        );
    }

    pub fn upsert(&self, collection: &str, points: Vec<MockPoint>) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::UpsertFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        for point in points {
            for (field, vector) in &point.vectors {
                let expected = *coll.vector_sizes.get(field).ok_or_else(|| {
                    VectorDbError::UnknownVectorField {
                        collection: collection.to_string(),
                        field: field.clone(),
                    }
                })?;
                if vector.len() != expected {
                    return Err(VectorDbError::InvalidDimension {
                        field: field.clone(),
                        expected,
                        actual: vector.len(),
                    });
                }
            }
            coll.points.insert(point.id.clone(), point);
        }

        Ok(())
    }

    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }

    /// Number of fused queries received so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Makes every subsequent query fail as if the index were unreachable.
    pub fn set_unavailable(&self, message: Option<&str>) {
        let mut slot = match self.unavailable.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = message.map(str::to_string);
    }

    /// Runs a single prefetch: cosine kNN over one named field.
    fn prefetch(
        coll: &MockCollection,
        collection: &str,
        spec: &PrefetchSpec,
    ) -> Result<Vec<ScoredHit>, VectorDbError> {
        let expected = *coll.vector_sizes.get(&spec.field_name).ok_or_else(|| {
            VectorDbError::UnknownVectorField {
                collection: collection.to_string(),
                field: spec.field_name.clone(),
            }
        })?;

        if spec.vector.len() != expected {
            return Err(VectorDbError::InvalidDimension {
                field: spec.field_name.clone(),
                expected,
                actual: spec.vector.len(),
            });
        }

        let mut hits: Vec<ScoredHit> = coll
            .points
            .values()
            .filter_map(|p| {
                p.vectors.get(&spec.field_name).map(|v| ScoredHit {
                    id: p.id.clone(),
                    score: cosine_similarity(&spec.vector, v),
                    payload: p.payload.clone(),
                })
            })
            .collect();

        // Points iterate in id order, so equal scores stay id-ordered.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(spec.limit as usize);
        Ok(hits)
    }
}

impl HybridSearchBackend for MockHybridClient {
    async fn is_ready(&self) -> bool {
        self.unavailable.read().map(|u| u.is_none()).unwrap_or(false)
    }

    async fn query_fused(
        &self,
        collection: &str,
        prefetch: &[PrefetchSpec],
        limit: u64,
    ) -> Result<Vec<FusedHit>, VectorDbError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        if let Ok(guard) = self.unavailable.read()
            && let Some(message) = guard.as_ref()
        {
            return Err(VectorDbError::QueryFailed {
                collection: collection.to_string(),
                message: message.clone(),
            });
        }

        let collections = self
            .collections
            .read()
            .map_err(|_| VectorDbError::QueryFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        let result_sets = prefetch
            .iter()
            .map(|spec| Self::prefetch(coll, collection, spec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reciprocal_rank_fusion(
            result_sets,
            RRF_RANK_CONSTANT,
            limit as usize,
        ))
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
