//! Qdrant vector database integration.
//!
//! The degree collection stores two named vectors per point
//! ([`CAREER_VECTOR_FIELD`](crate::constants::CAREER_VECTOR_FIELD) and
//! [`DESCRIPTION_VECTOR_FIELD`](crate::constants::DESCRIPTION_VECTOR_FIELD))
//! and the degree record as payload.

pub mod backend;
pub mod client;
pub mod error;
pub mod fusion;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use backend::VectorBackend;
pub use client::{HybridSearchBackend, QdrantClient, build_fused_query};
pub use error::VectorDbError;
pub use fusion::{reciprocal_rank_fusion, rrf_contribution};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockHybridClient, MockPoint, cosine_similarity};
pub use model::{FusedHit, HitId, Payload, PrefetchSpec, ScoredHit, qdrant_value_to_json};
