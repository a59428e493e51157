//! Tests for retrieval ranking over the sample corpus.

use super::support::{sample_chunks, sample_retriever};
use crate::embeddings::TrigramProvider;
use crate::types::ChunkId;
use std::sync::Arc;

fn trigram() -> Arc<TrigramProvider> {
    Arc::new(TrigramProvider::new(384))
}

#[tokio::test]
async fn test_chunk_text_retrieves_itself_first() {
    let retriever = sample_retriever(trigram()).await;

    for chunk in sample_chunks() {
        let hits = retriever.query(&chunk.text, 1).await.unwrap();
        assert_eq!(hits[0].id, chunk.id, "chunk {} not ranked first", chunk.id);
        assert!(hits[0].distance.abs() < 1e-6);
    }
}

#[tokio::test]
async fn test_rebuild_yields_identical_rankings() {
    let first = sample_retriever(trigram()).await;
    let second = sample_retriever(trigram()).await;

    for query in ["insomnia at night", "racing thoughts", "pressure at work", ""] {
        let a = first.query(query, 6).await.unwrap();
        let b = second.query(query, 6).await.unwrap();
        assert_eq!(a, b, "rankings differ for {:?}", query);
    }
    assert_eq!(first.stats().fingerprint, second.stats().fingerprint);
}

#[tokio::test]
async fn test_results_sorted_and_clipped() {
    let retriever = sample_retriever(trigram()).await;
    let total = retriever.len();

    let hits = retriever.query("calm breathing", total + 10).await.unwrap();
    assert_eq!(hits.len(), total);
    for pair in hits.windows(2) {
        assert!(
            pair[0].distance < pair[1].distance
                || (pair[0].distance == pair[1].distance && pair[0].id < pair[1].id)
        );
    }
}

#[tokio::test]
async fn test_keyword_query_finds_matching_chunk() {
    let retriever = sample_retriever(trigram()).await;
    let hits = retriever.query("insomnia at night", 1).await.unwrap();

    // First paragraph of the sleep section
    assert_eq!(hits[0].id, ChunkId(0));
    assert!(hits[0].text.contains("insomnia"));
}
