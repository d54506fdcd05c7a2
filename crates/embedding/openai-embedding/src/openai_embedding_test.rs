//! Unit tests for OpenAI embedding service construction.
//!
//! Tests that call the real API live in tests/openai_embedding_test.rs and are `#[ignore]`.

use super::*;
use embedding::EnvEmbeddingConfig;

#[test]
fn test_with_api_key_uses_default_model() {
    let service = OpenAIEmbedding::with_api_key("sk-test".to_string());
    assert_eq!(service.model(), "text-embedding-ada-002");
}

#[test]
fn test_with_model_overrides_model() {
    let service = OpenAIEmbedding::with_api_key("sk-test".to_string())
        .with_model("text-embedding-3-small".to_string());
    assert_eq!(service.model(), "text-embedding-3-small");
}

#[test]
fn test_from_config_takes_model_from_config() {
    let config = EnvEmbeddingConfig {
        embedding_model: "text-embedding-3-large".to_string(),
        openai_api_key: "sk-test".to_string(),
        openai_base_url: Some("http://localhost:9999/v1".to_string()),
    };
    let service = OpenAIEmbedding::from_config(&config);
    assert_eq!(service.model(), "text-embedding-3-large");
}
