//! Shared fixtures: a small corpus and a scripted generation client.

use crate::rag::{GenerationSettings, GroundedGenerator, Navigator};
use crate::retriever::Retriever;
use crate::types::{Chunk, ChunkId, RetrievedChunk};
use crate::{embeddings::EmbeddingProvider, segment};
use navigator_core::config::GenerationConfig;
use navigator_core::{AppError, AppResult};
use navigator_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use navigator_prompt::grounded_definition;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) const SAMPLE_CORPUS: &str = "\
SLEEP
========================================
Sleep difficulties often show up as trouble falling asleep, waking during the night, or insomnia that leaves you tired the next day.

A steady wake-up time, a dim and cool bedroom, and less screen light in the evening help the body settle into a natural sleep rhythm.
========================================
ANXIETY
========================================
Anxiety and worry can feel like racing thoughts, a tight chest, or a constant sense that something bad is about to happen.

Grounding exercises such as slow breathing or naming things you can see and hear can calm an anxious mind in the moment.
========================================
STRESS
========================================
Stress builds when demands at work or school outpace the time and energy available, and it often shows up as irritability.

Breaking large tasks into small steps and protecting short breaks during the day can make pressure feel more manageable.
";

pub(crate) fn sample_chunks() -> Vec<Chunk> {
    segment(SAMPLE_CORPUS)
}

pub(crate) fn retrieved(id: u32, text: &str) -> RetrievedChunk {
    RetrievedChunk {
        id: ChunkId(id),
        distance: 0.0,
        text: text.to_string(),
    }
}

pub(crate) async fn sample_retriever(provider: Arc<dyn EmbeddingProvider>) -> Retriever {
    Retriever::build(sample_chunks(), provider, Duration::from_secs(5))
        .await
        .unwrap()
}

pub(crate) async fn sample_navigator(
    provider: Arc<dyn EmbeddingProvider>,
    client: Arc<ScriptedClient>,
) -> Navigator {
    let retriever = Arc::new(sample_retriever(provider).await);
    let settings = GenerationSettings::from(&GenerationConfig::default());
    let generator = GroundedGenerator::new(client, grounded_definition(), settings);
    Navigator::new(retriever, generator, 1)
}

enum Script {
    Reply(String),
    Fail,
    Stall,
}

/// Generation client that follows a fixed script and records its calls.
pub(crate) struct ScriptedClient {
    script: Script,
    calls: AtomicUsize,
    last_request: Mutex<Option<LlmRequest>>,
    cancelled: Arc<AtomicBool>,
}

/// Sets the flag when an in-flight call is dropped.
struct CancelGuard(Arc<AtomicBool>);

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl ScriptedClient {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn replying(content: &str) -> Self {
        Self::with_script(Script::Reply(content.to_string()))
    }

    pub(crate) fn failing() -> Self {
        Self::with_script(Script::Fail)
    }

    /// Never answers; the call only ends by being dropped.
    pub(crate) fn stalling() -> Self {
        Self::with_script(Script::Stall)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<LlmRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub(crate) fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.script {
            Script::Reply(content) => Ok(LlmResponse {
                content: content.clone(),
                model: request.model.clone(),
                usage: LlmUsage::new(10, 20),
            }),
            Script::Fail => Err(AppError::Llm("HTTP 503: service unavailable".to_string())),
            Script::Stall => {
                let _guard = CancelGuard(self.cancelled.clone());
                std::future::pending::<AppResult<LlmResponse>>().await
            }
        }
    }
}
