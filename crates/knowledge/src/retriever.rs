//! Query-time retrieval over the shared index.

use crate::embeddings::EmbeddingProvider;
use crate::index::SearchIndex;
use crate::types::{Chunk, CorpusStats, RetrievedChunk};
use navigator_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// The chunk arena, its index and the provider that embedded it.
///
/// Read-only after construction and shared across requests behind an `Arc`.
#[derive(Debug)]
pub struct Retriever {
    chunks: Vec<Chunk>,
    index: SearchIndex,
    provider: Arc<dyn EmbeddingProvider>,
    query_timeout: Duration,
}

impl Retriever {
    /// Assemble a retriever from parts.
    ///
    /// Refuses a provider whose identity differs from the one recorded by
    /// the index.
    pub fn new(
        chunks: Vec<Chunk>,
        index: SearchIndex,
        provider: Arc<dyn EmbeddingProvider>,
        query_timeout: Duration,
    ) -> AppResult<Self> {
        if provider.model_name() != index.model()
            || provider.provider_name() != index.provider()
            || provider.dimensions() != index.dimensions()
        {
            return Err(AppError::Knowledge(format!(
                "Provider {}/{} ({} dims) does not match index built with {}/{} ({} dims)",
                provider.provider_name(),
                provider.model_name(),
                provider.dimensions(),
                index.provider(),
                index.model(),
                index.dimensions()
            )));
        }

        if chunks.len() != index.len() {
            return Err(AppError::Knowledge(format!(
                "Index holds {} vectors for {} chunks",
                index.len(),
                chunks.len()
            )));
        }

        Ok(Self {
            chunks,
            index,
            provider,
            query_timeout,
        })
    }

    /// Build the index with `provider` and assemble the retriever.
    pub async fn build(
        chunks: Vec<Chunk>,
        provider: Arc<dyn EmbeddingProvider>,
        query_timeout: Duration,
    ) -> AppResult<Self> {
        let index = SearchIndex::build(provider.as_ref(), &chunks).await?;
        Self::new(chunks, index, provider, query_timeout)
    }

    /// Retrieve the `top_k` chunks nearest to `text`.
    ///
    /// `top_k == 0` returns nothing without embedding. Embedding failures and
    /// timeouts surface as `AppError::Retrieval`.
    pub async fn query(&self, text: &str, top_k: usize) -> AppResult<Vec<RetrievedChunk>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let embedding = tokio::time::timeout(self.query_timeout, self.provider.embed(text))
            .await
            .map_err(|_| {
                AppError::Retrieval(format!(
                    "Query embedding timed out after {:?}",
                    self.query_timeout
                ))
            })?
            .map_err(|e| AppError::Retrieval(format!("Query embedding failed: {}", e)))?;

        let hits = self.index.search(&embedding, top_k)?;

        tracing::debug!(
            query_chars = text.chars().count(),
            hits = hits.len(),
            nearest = hits.first().map(|(_, d)| *d),
            "Retrieved chunks"
        );

        hits.into_iter()
            .map(|(id, distance)| {
                self.chunks
                    .get(id.index())
                    .map(|chunk| RetrievedChunk {
                        id,
                        distance,
                        text: chunk.text.clone(),
                    })
                    .ok_or_else(|| AppError::Retrieval(format!("Unknown chunk id {}", id)))
            })
            .collect()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            total_chunks: self.chunks.len(),
            embedding_provider: self.index.provider().to_string(),
            embedding_model: self.index.model().to_string(),
            dimensions: self.index.dimensions(),
            fingerprint: self.index.fingerprint().to_string(),
            built_at: self.index.built_at(),
        }
    }
}
