//! Remote embedder against a local provider stand-in.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use degree_search::embedding::{
    EmbeddingConfig, EmbeddingError, EmbeddingProvider, JinaEmbedder,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Clone)]
struct ProviderState {
    status: StatusCode,
    body: Value,
    delay: Duration,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl ProviderState {
    fn answering(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
            seen: Arc::default(),
        }
    }
}

async fn embeddings(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.seen.lock().unwrap().push((auth, request));

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, Json(state.body.clone()))
}

async fn spawn_provider(state: ProviderState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/v1/embeddings", post(embeddings))
        .with_state(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn embedder_for(addr: SocketAddr) -> JinaEmbedder {
    let config = EmbeddingConfig::remote(format!("http://{addr}/v1/embeddings"), "jina_test")
        .with_model("jina-embeddings-v2-small-en");
    JinaEmbedder::new(config).unwrap()
}

#[tokio::test]
async fn test_sends_model_input_and_bearer() {
    let state = ProviderState::answering(
        StatusCode::OK,
        json!({"data": [{"embedding": [0.25, -0.5, 1.0]}]}),
    );
    let addr = spawn_provider(state.clone()).await;

    let vector = EmbeddingProvider::embed(&embedder_for(addr), "Data Scientist")
        .await
        .unwrap();

    assert_eq!(vector, vec![0.25, -0.5, 1.0]);
    let seen = state.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer jina_test"));
    assert_eq!(
        body,
        &json!({"model": "jina-embeddings-v2-small-en", "input": ["Data Scientist"]})
    );
}

#[tokio::test]
async fn test_first_embedding_is_used() {
    let state = ProviderState::answering(
        StatusCode::OK,
        json!({"data": [{"embedding": [1.0]}, {"embedding": [2.0]}]}),
    );
    let addr = spawn_provider(state).await;

    let vector = embedder_for(addr).embed("x").await.unwrap();

    assert_eq!(vector, vec![1.0]);
}

#[tokio::test]
async fn test_error_status_is_provider_error() {
    let state = ProviderState::answering(
        StatusCode::UNAUTHORIZED,
        json!({"detail": "invalid api key"}),
    );
    let addr = spawn_provider(state.clone()).await;

    let err = embedder_for(addr).embed("x").await.unwrap_err();

    match err {
        EmbeddingError::Provider { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
    // No retries.
    assert_eq!(state.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_data_is_malformed() {
    for body in [
        json!({}),
        json!({"data": []}),
        json!({"data": [{"embedding": []}]}),
        json!({"data": [{"index": 0}]}),
    ] {
        let addr = spawn_provider(ProviderState::answering(StatusCode::OK, body.clone())).await;

        let err = embedder_for(addr).embed("x").await.unwrap_err();

        assert!(
            matches!(err, EmbeddingError::MalformedResponse { .. }),
            "{body} -> {err:?}"
        );
    }
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let state = ProviderState {
        delay: Duration::from_secs(2),
        ..ProviderState::answering(StatusCode::OK, json!({"data": [{"embedding": [1.0]}]}))
    };
    let addr = spawn_provider(state).await;

    let config = EmbeddingConfig::remote(format!("http://{addr}/v1/embeddings"), "k")
        .with_timeout(Duration::from_millis(100));
    let err = JinaEmbedder::new(config).unwrap().embed("x").await.unwrap_err();

    assert!(matches!(err, EmbeddingError::RequestFailed { .. }));
}
