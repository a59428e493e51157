//! Flat nearest-neighbour index over chunk embeddings.
//!
//! Vectors are stored contiguously in chunk order and searched exhaustively
//! by squared Euclidean distance. The index never normalises vectors; any
//! scaling is the provider's business.

use crate::embeddings::EmbeddingProvider;
use crate::types::{Chunk, ChunkId};
use chrono::{DateTime, Utc};
use navigator_core::{AppError, AppResult};
use sha2::{Digest, Sha256};

/// Immutable index built once from the full chunk sequence.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    vectors: Vec<f32>,
    dimensions: usize,
    len: usize,
    provider: String,
    model: String,
    fingerprint: String,
    built_at: DateTime<Utc>,
}

impl SearchIndex {
    /// Embed every chunk in one batch and build the index.
    ///
    /// # Errors
    /// Provider failure, a vector count different from the chunk count, or a
    /// vector whose length differs from the provider's declared dimensions.
    pub async fn build(provider: &dyn EmbeddingProvider, chunks: &[Chunk]) -> AppResult<Self> {
        if chunks.is_empty() {
            return Err(AppError::Knowledge(
                "Cannot build an index without chunks".to_string(),
            ));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = provider
            .embed_batch(&texts)
            .await
            .map_err(|e| AppError::Knowledge(format!("Failed to embed corpus: {}", e)))?;

        let index = Self::from_embeddings(
            provider.provider_name(),
            provider.model_name(),
            provider.dimensions(),
            chunks,
            embeddings,
        )?;

        tracing::info!(
            chunks = index.len,
            dimensions = index.dimensions,
            model = %index.model,
            fingerprint = %index.fingerprint,
            "Built search index"
        );

        Ok(index)
    }

    /// Build from precomputed embeddings, one per chunk in order.
    pub fn from_embeddings(
        provider: &str,
        model: &str,
        dimensions: usize,
        chunks: &[Chunk],
        embeddings: Vec<Vec<f32>>,
    ) -> AppResult<Self> {
        if embeddings.len() != chunks.len() {
            return Err(AppError::Knowledge(format!(
                "Embedding count mismatch: {} chunks, {} vectors",
                chunks.len(),
                embeddings.len()
            )));
        }

        let mut vectors = Vec::with_capacity(chunks.len() * dimensions);
        for (position, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != dimensions {
                return Err(AppError::Knowledge(format!(
                    "Embedding dimension mismatch for chunk {}: got {}, expected {}",
                    position,
                    embedding.len(),
                    dimensions
                )));
            }
            vectors.extend_from_slice(embedding);
        }

        Ok(Self {
            vectors,
            dimensions,
            len: chunks.len(),
            provider: provider.to_string(),
            model: model.to_string(),
            fingerprint: fingerprint(chunks),
            built_at: Utc::now(),
        })
    }

    /// Ids of the `top_k` nearest vectors with their distances, nearest first.
    ///
    /// Ties are broken by the lower id; `top_k` is clipped to the index size.
    pub fn search(&self, query: &[f32], top_k: usize) -> AppResult<Vec<(ChunkId, f32)>> {
        if query.len() != self.dimensions {
            return Err(AppError::Retrieval(format!(
                "Query dimension mismatch: got {}, expected {}",
                query.len(),
                self.dimensions
            )));
        }

        if top_k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(ChunkId, f32)> = self
            .vectors
            .chunks_exact(self.dimensions.max(1))
            .take(self.len)
            .enumerate()
            .map(|(position, vector)| (ChunkId(position as u32), squared_l2(query, vector)))
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(top_k.min(self.len));

        Ok(scored)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// SHA-256 over the chunk texts in order.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn fingerprint(chunks: &[Chunk]) -> String {
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update((chunk.text.len() as u64).to_le_bytes());
        hasher.update(chunk.text.as_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
