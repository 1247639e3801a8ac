//! Search orchestration: profile, embeddings, retrieval, formatting.

pub mod error;


pub use error::SearchError;

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::embedding::EmbeddingProvider;
use crate::profile::QuizSubmission;
use crate::recommend::{DegreeRecommendation, format_hits};
use crate::retrieval::HybridRetriever;
use crate::vectordb::HybridSearchBackend;

/// Successful search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub selected_career: String,
    pub user_profile: String,
    pub degrees: Vec<DegreeRecommendation>,
}

/// Runs one submission through the whole pipeline.
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct DegreeSearch<E, B> {
    embedder: E,
    retriever: HybridRetriever<B>,
    result_limit: i64,
}

impl<E, B> DegreeSearch<E, B>
where
    E: EmbeddingProvider,
    B: HybridSearchBackend,
{
    pub fn new(embedder: E, retriever: HybridRetriever<B>, result_limit: i64) -> Self {
        Self {
            embedder,
            retriever,
            result_limit,
        }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn retriever(&self) -> &HybridRetriever<B> {
        &self.retriever
    }

    pub fn result_limit(&self) -> i64 {
        self.result_limit
    }

    /// Decodes `body` and runs [`recommend`](Self::recommend).
    pub async fn recommend_json(
        &self,
        body: serde_json::Value,
    ) -> Result<SearchOutcome, SearchError> {
        let submission = QuizSubmission::from_json(body)?;
        self.recommend(&submission).await
    }

    /// Like [`recommend`](Self::recommend), aborting with
    /// [`SearchError::Timeout`] once `deadline` elapses.
    pub async fn recommend_within(
        &self,
        submission: &QuizSubmission,
        deadline: Duration,
    ) -> Result<SearchOutcome, SearchError> {
        tokio::time::timeout(deadline, self.recommend(submission))
            .await
            .map_err(|_| SearchError::Timeout(deadline))?
    }

    /// Returns the recommended degrees in fused rank order.
    ///
    /// The career and profile embeddings are requested concurrently; either
    /// failing aborts before the index is queried.
    #[instrument(skip(self, submission), fields(career = %submission.selected_career))]
    pub async fn recommend(
        &self,
        submission: &QuizSubmission,
    ) -> Result<SearchOutcome, SearchError> {
        let user_profile = submission.user_profile();
        debug!(profile_len = user_profile.len(), "Synthesized user profile");

        let (career_vector, profile_vector) = tokio::try_join!(
            self.embedder.embed(&submission.selected_career),
            self.embedder.embed(&user_profile),
        )?;

        let hits = self
            .retriever
            .retrieve(career_vector, profile_vector, self.result_limit)
            .await?;

        let degrees = format_hits(hits)?;
        info!(results = degrees.len(), "Degree search complete");

        Ok(SearchOutcome {
            selected_career: submission.selected_career.clone(),
            user_profile,
            degrees,
        })
    }
}
