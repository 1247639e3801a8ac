use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::embedding::EmbeddingProvider;
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::profile::QuizSubmission;
use crate::recommend::DegreeRecommendation;
use crate::search::{SearchError, SearchOutcome};
use crate::vectordb::HybridSearchBackend;

pub const SUBMISSION_RECEIVED: &str = "Submission received";
pub const POST_ONLY_MESSAGE: &str = "This route only support POST method.";
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

#[derive(Debug, Serialize)]
pub struct RequestEcho {
    pub selected_career: String,
    pub user_profile: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub message: &'static str,
    pub request: RequestEcho,
    pub data: Vec<DegreeRecommendation>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            message: SUBMISSION_RECEIVED,
            request: RequestEcho {
                selected_career: outcome.selected_career,
                user_profile: outcome.user_profile,
            },
            data: outcome.degrees,
        }
    }
}

/// `POST /api/search`: runs a quiz submission through the search pipeline.
#[instrument(skip(state, body), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn search_handler<E, B>(
    State(state): State<HandlerState<E, B>>,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    E: EmbeddingProvider + 'static,
    B: HybridSearchBackend + 'static,
{
    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| GatewayError::InvalidJson)?;

    let body_hash = blake3::hash(&body);
    debug!(hash = %body_hash, bytes = body.len(), "Processing search request");

    let submission = QuizSubmission::from_json(value).map_err(SearchError::from)?;
    let outcome = state
        .search
        .recommend_within(&submission, state.request_timeout)
        .await?;

    Ok((StatusCode::CREATED, Json(SearchResponse::from(outcome))).into_response())
}

/// `GET /api/search`: describes the expected POST body.
#[instrument]
pub async fn search_info_handler() -> Response {
    let body = serde_json::json!({
        "message": POST_ONLY_MESSAGE,
        "data": {
            "selected_career": "selected career from quiz",
            "answers": ["answers from quiz"]
        }
    });

    (StatusCode::OK, Json(body)).into_response()
}

/// `OPTIONS /api/search`: CORS preflight without the request-method header.
#[instrument]
pub async fn preflight_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    (StatusCode::OK, headers).into_response()
}
