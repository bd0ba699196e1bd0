use std::io::Write;
use std::sync::Arc;

use hairadvisor::embeddings::Embedder;
use hairadvisor::embeddings::EmbeddingClient;
use hairadvisor::embeddings::EmbeddingProvider;
use hairadvisor::rag::KnowledgeBase;
use hairadvisor::rag::Retriever;
use hairadvisor::HairAdvisorError;
use serde_json::json;

mod common;
use common::mock_server::mock_embedding;
use common::mock_server::spawn_mock_server;

const CORPUS: &str = "Aqua Revive hydrates.\n\nOil Nutritive tames frizz.\n";

fn client(provider: EmbeddingProvider, base_url: &str) -> EmbeddingClient {
    EmbeddingClient::new(
        provider,
        "mock-embed".to_string(),
        base_url.to_string(),
        Some("test-key".to_string()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_openai_batch_keeps_input_order() {
    let (url, state) = spawn_mock_server(Vec::new()).await;
    let client = client(EmbeddingProvider::OpenAI, &url);

    let vectors = client.embed_batch(&["dry ends", "frizz"]).await.unwrap();
    assert_eq!(vectors, vec![mock_embedding("dry ends"), mock_embedding("frizz")]);

    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["input"], json!(["dry ends", "frizz"]));
    assert_eq!(requests[0]["model"], "mock-embed");
}

#[tokio::test]
async fn test_ollama_sends_one_request_per_text() {
    let (url, state) = spawn_mock_server(Vec::new()).await;
    let client = client(EmbeddingProvider::Ollama, &url);

    let texts = ["split ends", "greasy   roots", "shine"];
    let vectors = client.embed_batch(&texts).await.unwrap();
    assert_eq!(
        vectors,
        vec![
            mock_embedding("split ends"),
            mock_embedding("greasy roots"),
            mock_embedding("shine"),
        ]
    );

    let requests = state.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r["model"] == "mock-embed"));
    assert!(requests.iter().any(|r| r["prompt"] == "greasy roots"));
}

#[tokio::test]
async fn test_knowledge_base_loads_through_remote_providers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{CORPUS}").unwrap();

    for provider in [EmbeddingProvider::OpenAI, EmbeddingProvider::Ollama] {
        let (url, _state) = spawn_mock_server(Vec::new()).await;
        let embedder: Arc<dyn Embedder> = Arc::new(client(provider, &url));

        let base = KnowledgeBase::load("remote", file.path(), embedder.as_ref())
            .await
            .unwrap();
        assert_eq!(base.len(), 2);
        assert_eq!(base.dimension(), 3);
        assert_eq!(
            base.passages()[0].embedding,
            mock_embedding("Aqua Revive hydrates.")
        );

        let retriever = Retriever::new(embedder);
        let top = retriever
            .retrieve("Oil Nutritive tames frizz.", &base, 1)
            .await
            .unwrap();
        assert_eq!(top, vec!["Oil Nutritive tames frizz.".to_string()]);
    }
}

#[tokio::test]
async fn test_missing_embedding_is_an_error() {
    let (url, _state) = spawn_mock_server(Vec::new()).await;
    let client = client(EmbeddingProvider::OpenAI, &url);

    let err = client.embed_batch(&["keep", "drop this"]).await.unwrap_err();
    assert!(matches!(err, HairAdvisorError::EmbeddingError(_)));
}

#[tokio::test]
async fn test_mixed_dimensions_are_rejected() {
    let (url, _state) = spawn_mock_server(Vec::new()).await;
    let client = client(EmbeddingProvider::Ollama, &url);

    let texts = vec!["narrow passage".to_string(), "wide passage".to_string()];
    let err = KnowledgeBase::from_texts("mixed", texts, &client)
        .await
        .unwrap_err();
    assert!(matches!(err, HairAdvisorError::EmbeddingError(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_an_error() {
    let client = client(EmbeddingProvider::Ollama, "http://127.0.0.1:9/missing");
    let err = client.embed("dry hair").await.unwrap_err();
    assert!(matches!(err, HairAdvisorError::EmbeddingError(_)));
}
