//! HTTP gateway (Axum) for degree search.
//!
//! This module is primarily used by the `degree-search` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{preflight_handler, search_handler, search_info_handler};
pub use state::HandlerState;

use crate::embedding::EmbeddingProvider;
use crate::vectordb::HybridSearchBackend;

pub const SEARCH_ROUTE: &str = "/api/search";

pub const STATUS_READY: &str = "ready";
pub const STATUS_PENDING: &str = "pending";

pub fn create_router_with_state<E, B>(state: HandlerState<E, B>) -> Router
where
    E: EmbeddingProvider + 'static,
    B: HybridSearchBackend + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<E, B>))
        .route(
            SEARCH_ROUTE,
            get(search_info_handler)
                .post(search_handler::<E, B>)
                .options(preflight_handler),
        )
        .layer(allow_any_origin())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Adds `Access-Control-Allow-Origin: *` to every response. Preflight
/// requests are answered by [`preflight_handler`].
pub fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    )
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub vectordb: &'static str,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E, B>(State(state): State<HandlerState<E, B>>) -> Response
where
    E: EmbeddingProvider + 'static,
    B: HybridSearchBackend + 'static,
{
    let vectordb_ready = state.search.retriever().backend().is_ready().await;
    let embedder_mode = if state.search.embedder().is_stub() {
        "stub"
    } else {
        "real"
    };

    let components = ComponentStatus {
        http: STATUS_READY,
        vectordb: if vectordb_ready {
            STATUS_READY
        } else {
            STATUS_PENDING
        },
        embedder_mode,
    };

    let (status_code, status_msg) = if vectordb_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "pending")
    };

    (
        status_code,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
