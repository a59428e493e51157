//! Core types for the knowledge corpus.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a chunk in segmentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(pub u32);

impl ChunkId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One retrievable paragraph of corpus text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,

    /// Trimmed paragraph text
    pub text: String,
}

/// A chunk returned by a query, with its squared L2 distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    pub id: ChunkId,
    pub distance: f32,
    pub text: String,
}

/// Summary of the loaded corpus and index, for health and debug surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub total_chunks: usize,
    pub embedding_provider: String,
    pub embedding_model: String,
    pub dimensions: usize,
    pub fingerprint: String,
    pub built_at: chrono::DateTime<chrono::Utc>,
}
