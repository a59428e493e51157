//! Embedding provider trait and factory.

use super::providers::trigram::TRIGRAM_MODEL;
use super::providers::{MockProvider, OllamaProvider, TrigramProvider};
use navigator_core::config::EmbeddingConfig;
use navigator_core::{AppError, AppResult};
use std::sync::Arc;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "trigram", "ollama", "mock")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts, one vector per text in order.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Knowledge("No embedding returned".to_string()))
    }
}

/// Create an embedding provider based on configuration.
///
/// Network providers verify their endpoint here, so an unreachable service
/// fails startup. `embedding.model` selects the Ollama model; the trigram
/// embedder has a single model and rejects any other name.
pub async fn create_provider(config: &EmbeddingConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider.as_str() {
        "trigram" => {
            if config.model != TRIGRAM_MODEL {
                return Err(AppError::Config(format!(
                    "Embedding model '{}' is not available for the trigram provider (use '{}')",
                    config.model, TRIGRAM_MODEL
                )));
            }
            Arc::new(TrigramProvider::new(config.dimensions))
        }
        "mock" => Arc::new(MockProvider::new(config.dimensions)),
        "ollama" => Arc::new(OllamaProvider::new(config).await?),
        other => {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: '{}'. Supported providers: trigram, ollama, mock",
                other
            )))
        }
    };

    tracing::debug!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        dimensions = provider.dimensions(),
        "Created embedding provider"
    );

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: provider.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_trigram_provider() {
        let provider = create_provider(&config("trigram")).await.unwrap();
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
        assert_eq!(provider.dimensions(), 384);
    }

    #[tokio::test]
    async fn test_trigram_rejects_other_model() {
        let cfg = EmbeddingConfig {
            model: "nomic-embed-text".to_string(),
            ..config("trigram")
        };
        let err = create_provider(&cfg).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("nomic-embed-text"));
    }

    #[tokio::test]
    async fn test_create_mock_provider() {
        let provider = create_provider(&config("mock")).await.unwrap();
        assert_eq!(provider.provider_name(), "mock");
    }

    #[tokio::test]
    async fn test_create_unknown_provider() {
        let err = create_provider(&config("unknown")).await.unwrap_err();
        assert!(err.to_string().contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let provider = create_provider(&EmbeddingConfig::default()).await.unwrap();
        let embedding = provider.embed("test text").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
