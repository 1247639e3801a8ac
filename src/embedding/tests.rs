use super::*;
use std::time::Duration;

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.url, "https://api.jina.ai/v1/embeddings");
        assert_eq!(config.model, "jina-embeddings-v2-small-en");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.is_stub());
    }

    #[test]
    fn test_remote_requires_api_key() {
        let config = EmbeddingConfig::default();
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));

        let config = EmbeddingConfig::remote("http://localhost:9/v1/embeddings", "key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = EmbeddingConfig::remote("http://localhost:9", "key")
            .with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stub_dim_must_be_positive() {
        assert!(EmbeddingConfig::stub().with_stub_dim(0).validate().is_err());
        assert!(EmbeddingConfig::stub().validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = EmbeddingConfig::remote("http://localhost:9", "super-secret");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("super-secret"));
        assert!(debug_str.contains("<redacted>"));
    }
}

mod stub_tests {
    use super::*;

    #[test]
    fn test_stub_dimension() {
        let embedder = StubEmbedder::new(64);
        let v = embedder.embed("Data Scientist").unwrap();
        assert_eq!(v.len(), 64);
    }

    #[test]
    fn test_stub_is_deterministic() {
        let embedder = StubEmbedder::new(32);
        assert_eq!(
            embedder.embed("Nurse").unwrap(),
            embedder.embed("Nurse").unwrap()
        );
    }

    #[test]
    fn test_stub_differs_per_text() {
        let embedder = StubEmbedder::new(32);
        assert_ne!(
            embedder.embed("Nurse").unwrap(),
            embedder.embed("Engineer").unwrap()
        );
    }

    #[test]
    fn test_stub_is_normalized() {
        let embedder = StubEmbedder::new(128);
        let v = embedder.embed("What do you enjoy? math, coding").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm was {norm}");
    }
}

mod backend_tests {
    use super::*;

    #[test]
    fn test_backend_from_stub_config() {
        let backend = EmbeddingBackend::from_config(EmbeddingConfig::stub()).unwrap();
        assert!(backend.is_stub());
    }

    #[test]
    fn test_backend_from_remote_config() {
        let backend = EmbeddingBackend::from_config(EmbeddingConfig::remote(
            "http://127.0.0.1:9/v1/embeddings",
            "key",
        ))
        .unwrap();
        assert!(!backend.is_stub());
        match backend {
            EmbeddingBackend::Remote(e) => assert_eq!(e.model(), "jina-embeddings-v2-small-en"),
            EmbeddingBackend::Stub(_) => panic!("expected remote backend"),
        }
    }

    #[test]
    fn test_backend_remote_without_key_fails() {
        let config = EmbeddingConfig {
            url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        assert!(EmbeddingBackend::from_config(config).is_err());
    }

    #[tokio::test]
    async fn test_backend_stub_embeds_through_trait() {
        let backend =
            EmbeddingBackend::from_config(EmbeddingConfig::stub().with_stub_dim(16)).unwrap();
        let v = EmbeddingProvider::embed(&backend, "career").await.unwrap();
        assert_eq!(v.len(), 16);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_request_failure() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let embedder = JinaEmbedder::new(
            EmbeddingConfig::remote("http://127.0.0.1:9/v1/embeddings", "key")
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = embedder.embed("hello").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::RequestFailed { .. }));
    }
}
