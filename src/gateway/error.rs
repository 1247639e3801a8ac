use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::search::SearchError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid JSON in request body")]
    InvalidJson,

    #[error("invalid request: {0}")]
    InvalidRequest(SearchError),

    #[error("processing error: {0}")]
    ProcessingFailed(SearchError),
}

impl From<SearchError> for GatewayError {
    fn from(err: SearchError) -> Self {
        if err.is_client_error() {
            GatewayError::InvalidRequest(err)
        } else {
            GatewayError::ProcessingFailed(err)
        }
    }
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidJson | GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::ProcessingFailed(err) => match err {
                SearchError::EmbeddingProvider(_) => StatusCode::BAD_GATEWAY,
                SearchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", error_message);
        } else {
            warn!(status = status.as_u16(), "{}", error_message);
        }

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
