//! Degree search library crate (used by the server and integration tests).
//!
//! Turns a career-quiz submission into a short list of recommended university
//! degrees: the chosen career and a synthesized answer profile are embedded,
//! matched against two named vectors per degree, and fused by rank.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`QuizSubmission`], [`QuizAnswer`], [`synthesize`] - Request model and profile text
//! - [`DegreeSearch`], [`SearchOutcome`], [`SearchError`] - The search pipeline
//! - [`DegreeRecommendation`] - Response item
//!
//! ## Embedding
//! - [`EmbeddingProvider`], [`EmbeddingBackend`], [`EmbeddingConfig`]
//! - [`JinaEmbedder`] (remote) and [`StubEmbedder`] (deterministic)
//!
//! ## Vector Database
//! - [`HybridSearchBackend`], [`VectorBackend`], [`QdrantClient`]
//! - [`HybridRetriever`] - Prefetch pair construction
//! - [`reciprocal_rank_fusion`] - In-process RRF
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod profile;
pub mod recommend;
pub mod retrieval;
pub mod search;
pub mod vectordb;

pub use config::{Config, ConfigError};
pub use embedding::{
    EmbeddingBackend, EmbeddingConfig, EmbeddingError, EmbeddingProvider, JinaEmbedder,
    StubEmbedder,
};
pub use profile::{ProfileError, QuizAnswer, QuizSubmission, synthesize};
pub use recommend::{DegreeRecommendation, DegreeRecord, FormatError, format_hits};
pub use retrieval::HybridRetriever;
pub use search::{DegreeSearch, SearchError, SearchOutcome};
pub use vectordb::{
    FusedHit, HitId, HybridSearchBackend, PrefetchSpec, QdrantClient, VectorBackend,
    VectorDbError, reciprocal_rank_fusion,
};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::{MockHybridClient, MockPoint};
