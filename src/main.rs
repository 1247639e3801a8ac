//! Degree search HTTP server entrypoint.

use std::net::SocketAddr;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use degree_search::config::Config;
use degree_search::embedding::{EmbeddingBackend, EmbeddingConfig, EmbeddingProvider};
use degree_search::gateway::{HandlerState, create_router_with_state};
use degree_search::retrieval::HybridRetriever;
use degree_search::search::DegreeSearch;
use degree_search::vectordb::VectorBackend;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
  ___  ___ ___ ___ ___ ___   ___ ___   _   ___  ___ _  _
 |   \| __/ __| _ \ __| __| / __| __| /_\ | _ \/ __| || |
 | |) | _| (_ |   / _|| _|  \__ \ _| / _ \|   / (__| __ |
 |___/|___\___|_|_\___|___| |___/___/_/ \_\_|_\\___|_||_|

        QUIZ. EMBED. FUSE.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        collection = %config.collection_name,
        "Degree search starting"
    );

    let embedding_config = EmbeddingConfig::from_config(&config);
    let stub_dim = embedding_config.stub_dim;
    let embedder = EmbeddingBackend::from_config(embedding_config)?;
    if embedder.is_stub() {
        tracing::warn!("EMBEDDING_URL selects the stub embedder; results are not semantic");
    }

    let backend = VectorBackend::from_config(&config.qdrant_url, config.qdrant_api_key.clone())?;
    prepare_backend(&backend, &config.collection_name, stub_dim).await;

    let retriever = HybridRetriever::new(backend, config.collection_name.clone());
    let search = DegreeSearch::new(embedder, retriever, config.result_limit);
    let state = HandlerState::new(search, config.request_timeout());

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Degree search shutdown complete");
    Ok(())
}

/// Checks the degree collection is reachable. The mock index gets an empty
/// collection so offline runs answer with no results instead of errors.
async fn prepare_backend(backend: &VectorBackend, collection: &str, dim: usize) {
    match backend {
        VectorBackend::Qdrant(client) => match client.collection_exists(collection).await {
            Ok(true) => tracing::info!(collection, "Degree collection found"),
            Ok(false) => tracing::warn!(collection, "Degree collection does not exist yet"),
            Err(e) => tracing::warn!(error = %e, "Qdrant not reachable at startup"),
        },
        #[cfg(feature = "mock")]
        VectorBackend::Mock(client) => {
            use degree_search::constants::{CAREER_VECTOR_FIELD, DESCRIPTION_VECTOR_FIELD};

            tracing::warn!("QDRANT_URL selects the in-memory index; it starts empty");
            client.create_collection(
                collection,
                &[(CAREER_VECTOR_FIELD, dim), (DESCRIPTION_VECTOR_FIELD, dim)],
            );
        }
    }
    #[cfg(not(feature = "mock"))]
    let _ = dim;
}

/// Probes `/healthz` on the configured port. Exit code 0 when healthy, 1 otherwise.
async fn run_health_check() -> i32 {
    let port = std::env::var("DEGREE_SEARCH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
