use std::fmt;

use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{PointId, ScoredPoint, Value};

/// Stored record attached to an indexed point.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Point identifier as assigned by the index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HitId {
    Num(u64),
    Uuid(String),
}

impl fmt::Display for HitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitId::Num(n) => write!(f, "{}", n),
            HitId::Uuid(u) => f.write_str(u),
        }
    }
}

impl From<u64> for HitId {
    fn from(n: u64) -> Self {
        HitId::Num(n)
    }
}

impl HitId {
    pub fn from_point_id(id: Option<PointId>) -> Option<Self> {
        match id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => Some(HitId::Num(n)),
            Some(PointIdOptions::Uuid(u)) => Some(HitId::Uuid(u)),
            None => None,
        }
    }
}

/// A nearest-neighbour sub-query against one named vector field.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefetchSpec {
    pub vector: Vec<f32>,
    pub field_name: String,
    pub limit: u64,
}

impl PrefetchSpec {
    pub fn new(vector: Vec<f32>, field_name: impl Into<String>, limit: u64) -> Self {
        Self {
            vector,
            field_name: field_name.into(),
            limit,
        }
    }
}

/// Single-signal hit, in the rank order of its prefetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredHit {
    pub id: HitId,
    pub score: f32,
    pub payload: Payload,
}

/// Hit after rank fusion. `score` is the fused score.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedHit {
    pub id: HitId,
    pub score: f32,
    pub payload: Payload,
}

impl FusedHit {
    pub fn new(id: impl Into<HitId>, score: f32, payload: Payload) -> Self {
        Self {
            id: id.into(),
            score,
            payload,
        }
    }

    /// Converts a Qdrant query result. Points without an id are skipped.
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = HitId::from_point_id(point.id)?;
        let payload = point
            .payload
            .into_iter()
            .map(|(key, value)| (key, qdrant_value_to_json(value)))
            .collect();

        Some(FusedHit {
            id,
            score: point.score,
            payload,
        })
    }
}

/// Converts a Qdrant payload value into JSON.
pub fn qdrant_value_to_json(value: Value) -> serde_json::Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::IntegerValue(i)) => serde_json::Value::from(i),
        Some(Kind::DoubleValue(d)) => serde_json::Number::from_f64(d)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(qdrant_value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => serde_json::Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, qdrant_value_to_json(v)))
                .collect(),
        ),
    }
}
