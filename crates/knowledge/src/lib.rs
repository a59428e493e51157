//! Knowledge corpus, retrieval and grounded answering.
//!
//! The corpus is segmented and embedded once at startup into an immutable
//! [`Retriever`]; [`Navigator`] answers queries against it.

pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod rag;
pub mod retriever;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use chunker::{load_chunks, load_corpus, segment};
pub use embeddings::{create_provider, EmbeddingProvider};
pub use index::SearchIndex;
pub use rag::{AgeGroup, GroundedGenerator, Navigator, ResponseStatus, SafeResponse};
pub use retriever::Retriever;
pub use types::{Chunk, ChunkId, CorpusStats, RetrievedChunk};

use navigator_core::{AppConfig, AppResult};
use std::sync::Arc;

/// Load, segment and embed the configured corpus.
///
/// Every failure here is fatal for startup.
pub async fn build_retriever(config: &AppConfig) -> AppResult<Retriever> {
    let chunks = load_chunks(&config.corpus_path)?;
    let provider = create_provider(&config.embedding).await?;
    Retriever::build(chunks, provider, config.embedding.timeout()).await
}

/// Assemble the full pipeline from configuration and a generation client.
pub async fn build_navigator(
    config: &AppConfig,
    client: Arc<dyn navigator_llm::LlmClient>,
) -> AppResult<Navigator> {
    let retriever = Arc::new(build_retriever(config).await?);
    let generator = GroundedGenerator::from_config(client, &config.generation)?;
    Ok(Navigator::new(retriever, generator, config.retrieval.top_k))
}
