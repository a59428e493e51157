//! Mock embedding provider for tests.

use crate::embeddings::provider::EmbeddingProvider;
use navigator_core::{AppError, AppResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub const MOCK_MODEL: &str = "mock-v1";

/// Deterministic provider with call counting and failure injection.
///
/// Vectors are byte histograms folded into `dimensions` buckets, so equal
/// texts always map to equal vectors. No normalisation is applied.
#[derive(Debug)]
pub struct MockProvider {
    dimensions: usize,
    model: String,
    calls: AtomicUsize,
    texts_embedded: AtomicUsize,
    failing: AtomicBool,
    delay: Option<Duration>,
    output_dimensions: Option<usize>,
}

impl MockProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            model: MOCK_MODEL.to_string(),
            calls: AtomicUsize::new(0),
            texts_embedded: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            delay: None,
            output_dimensions: None,
        }
    }

    /// Report a different model identity.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sleep before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Emit vectors of a different length than `dimensions()` declares.
    pub fn with_output_dimensions(mut self, dimensions: usize) -> Self {
        self.output_dimensions = Some(dimensions);
        self
    }

    /// Make every subsequent call fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `embed_batch` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of texts embedded so far, across all calls.
    pub fn texts_embedded(&self) -> usize {
        self.texts_embedded.load(Ordering::SeqCst)
    }

    fn embed_text(&self, text: &str, dimensions: usize) -> Vec<f32> {
        let mut embedding = vec![0.0f32; dimensions];
        if dimensions == 0 {
            return embedding;
        }
        for byte in text.to_lowercase().bytes() {
            embedding[byte as usize % dimensions] += 1.0;
        }
        embedding
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Knowledge(
                "Mock embedding provider failure".to_string(),
            ));
        }

        self.texts_embedded.fetch_add(texts.len(), Ordering::SeqCst);
        let dimensions = self.output_dimensions.unwrap_or(self.dimensions);
        Ok(texts
            .iter()
            .map(|text| self.embed_text(text, dimensions))
            .collect())
    }
}
