//! Maps fused hits onto the degree recommendations returned to clients.
//!
//! Payloads are decoded into [`DegreeRecord`] with every field required. A
//! record missing a field means the stored corpus and this service disagree on
//! the schema, so the whole batch fails instead of being defaulted.


use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vectordb::{FusedHit, HitId};

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed payload for point {id}: {reason}")]
    MalformedPayload { id: HitId, reason: String },
}

/// Degree record as stored in the index payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeRecord {
    pub degree_title: String,
    pub careers: Vec<String>,
    pub short_description: String,
}

/// One recommended degree, as serialized in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeRecommendation {
    pub degree_title: String,
    pub careers: Vec<String>,
    pub degree_description: String,
}

impl From<DegreeRecord> for DegreeRecommendation {
    fn from(record: DegreeRecord) -> Self {
        Self {
            degree_title: record.degree_title,
            careers: record.careers,
            degree_description: record.short_description,
        }
    }
}

impl DegreeRecommendation {
    /// Decodes one hit's payload.
    pub fn from_hit(hit: FusedHit) -> Result<Self, FormatError> {
        let FusedHit { id, payload, .. } = hit;
        serde_json::from_value::<DegreeRecord>(serde_json::Value::Object(payload))
            .map(Self::from)
            .map_err(|e| FormatError::MalformedPayload {
                id,
                reason: e.to_string(),
            })
    }
}

/// Converts hits in rank order. Fails on the first malformed payload and
/// returns nothing in that case.
pub fn format_hits(hits: Vec<FusedHit>) -> Result<Vec<DegreeRecommendation>, FormatError> {
    hits.into_iter().map(DegreeRecommendation::from_hit).collect()
}
