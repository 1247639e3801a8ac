//! Test server harness.

use std::net::SocketAddr;
use std::time::Duration;

use degree_search::constants::{CAREER_VECTOR_FIELD, DESCRIPTION_VECTOR_FIELD};
use degree_search::embedding::StubEmbedder;
use degree_search::gateway::{HandlerState, create_router_with_state};
use degree_search::retrieval::HybridRetriever;
use degree_search::search::DegreeSearch;
use degree_search::vectordb::{MockHybridClient, MockPoint, Payload};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
const TEST_COLLECTION_NAME: &str = "degree_search_test";
pub const TEST_EMBEDDING_DIM: usize = 32;

/// Degree titles loaded into the in-memory index by default.
pub const DEFAULT_CATALOG: [&str; 10] = [
    "Data Science",
    "Statistics",
    "Computer Science",
    "Software Engineering",
    "Mathematics",
    "Economics",
    "Psychology",
    "Nursing",
    "Civil Engineering",
    "Fine Art",
];

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub collection_name: Option<String>,
    pub catalog: Vec<String>,
    pub result_limit: i64,
    pub request_timeout: Duration,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            collection_name: None,
            catalog: DEFAULT_CATALOG.iter().map(|t| t.to_string()).collect(),
            result_limit: 5,
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl TestServerConfig {
    pub fn empty_catalog() -> Self {
        Self {
            catalog: Vec::new(),
            ..Default::default()
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub index: MockHybridClient,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn find_available_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok(addr.port())
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Payload in the stored degree-record shape.
pub fn degree_payload(title: &str) -> Payload {
    let mut payload = Payload::new();
    payload.insert("degreeTitle".to_string(), title.into());
    payload.insert(
        "careers".to_string(),
        serde_json::json!([format!("{title} Specialist"), format!("{title} Researcher")]),
    );
    payload.insert(
        "shortDescription".to_string(),
        format!("A degree in {title}.").into(),
    );
    payload
}

/// Builds an index whose vectors come from the stub embedder the server uses.
pub fn seeded_index(collection: &str, catalog: &[String]) -> Result<MockHybridClient, ServerStartupError> {
    let embedder = StubEmbedder::new(TEST_EMBEDDING_DIM);
    let index = MockHybridClient::new();
    index.create_collection(
        collection,
        &[
            (CAREER_VECTOR_FIELD, TEST_EMBEDDING_DIM),
            (DESCRIPTION_VECTOR_FIELD, TEST_EMBEDDING_DIM),
        ],
    );

    let mut points = Vec::with_capacity(catalog.len());
    for (i, title) in catalog.iter().enumerate() {
        let careers = format!("{title} Specialist, {title} Researcher");
        let description = format!("A degree in {title}.");
        let career_vector = embedder
            .embed(&careers)
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
        let description_vector = embedder
            .embed(&description)
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
        points.push(
            MockPoint::new(i as u64 + 1, degree_payload(title))
                .with_vector(CAREER_VECTOR_FIELD, career_vector)
                .with_vector(DESCRIPTION_VECTOR_FIELD, description_vector),
        );
    }

    index
        .upsert(collection, points)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    Ok(index)
}

/// Spawns a server with the stub embedder and an in-memory index.
///
/// No Qdrant instance or embedding API key is needed.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let collection_name = config
        .collection_name
        .unwrap_or_else(|| TEST_COLLECTION_NAME.to_string());

    let index = seeded_index(&collection_name, &config.catalog)?;

    let search = DegreeSearch::new(
        StubEmbedder::new(TEST_EMBEDDING_DIM),
        HybridRetriever::new(index.clone(), collection_name),
        config.result_limit,
    );
    let state = HandlerState::new(search, config.request_timeout);
    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        index,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
