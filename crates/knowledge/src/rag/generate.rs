//! Grounded generation with reflection and fallback.

use crate::rag::types::{AgeGroup, Summary, SummaryOrigin};
use crate::types::RetrievedChunk;
use navigator_core::config::GenerationConfig;
use navigator_core::text::truncate_chars;
use navigator_core::{AppError, AppResult};
use navigator_llm::{LlmClient, LlmRequest};
use navigator_prompt::{build_prompt, grounded_definition, load_prompt, PromptDefinition};
use navigator_safety::{fallback, reflect};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Separator between retrieved chunks in the context string.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Limits and sampling settings for one generation call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub max_context_chars: usize,
    pub max_query_chars: usize,
    pub max_draft_chars: usize,
}

impl From<&GenerationConfig> for GenerationSettings {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: config.timeout(),
            max_context_chars: config.max_context_chars,
            max_query_chars: config.max_query_chars,
            max_draft_chars: config.max_draft_chars,
        }
    }
}

/// Builds the grounded instruction, calls the model once, and reflects the
/// draft. Any failure along the way yields the fallback instead.
pub struct GroundedGenerator {
    client: Arc<dyn LlmClient>,
    prompt: PromptDefinition,
    settings: GenerationSettings,
}

impl GroundedGenerator {
    pub fn new(
        client: Arc<dyn LlmClient>,
        prompt: PromptDefinition,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            client,
            prompt,
            settings,
        }
    }

    /// Use the configured prompt override file, or the built-in instruction.
    pub fn from_config(client: Arc<dyn LlmClient>, config: &GenerationConfig) -> AppResult<Self> {
        let prompt = match &config.prompt_file {
            Some(path) => load_prompt(path)?,
            None => grounded_definition(),
        };
        Ok(Self::new(client, prompt, GenerationSettings::from(config)))
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Join and truncate the retrieved chunks into the context string.
    pub fn context(&self, chunks: &[RetrievedChunk]) -> String {
        let joined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);
        truncate_chars(&joined, self.settings.max_context_chars).to_string()
    }

    /// Produce a summary grounded in `context_chunks`.
    ///
    /// Never fails: errors are logged and replaced by the fallback built from
    /// the truncated context.
    pub async fn generate(
        &self,
        context_chunks: &[RetrievedChunk],
        query_text: &str,
        age_group: AgeGroup,
    ) -> Summary {
        let context = self.context(context_chunks);
        let query = truncate_chars(query_text, self.settings.max_query_chars);

        match self.draft(&context, query, age_group).await {
            Ok(draft) => {
                let reflection = reflect(&draft);
                tracing::info!(
                    provider = self.client.provider_name(),
                    verdict = reflection.verdict.as_str(),
                    draft_chars = draft.chars().count(),
                    "Generated summary"
                );
                Summary {
                    text: reflection.text,
                    origin: SummaryOrigin::Model(reflection.verdict),
                }
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.client.provider_name(),
                    error = %e,
                    "Generation failed, using fallback"
                );
                Summary {
                    text: fallback(&context),
                    origin: SummaryOrigin::Fallback,
                }
            }
        }
    }

    /// Build the instruction, call the model, and trim and cap its reply.
    async fn draft(&self, context: &str, query: &str, age_group: AgeGroup) -> AppResult<String> {
        let mut variables = BTreeMap::new();
        variables.insert("audience".to_string(), age_group.audience().to_string());
        variables.insert("context".to_string(), context.to_string());
        variables.insert("query".to_string(), query.to_string());

        let built = build_prompt(&self.prompt, variables)?;
        tracing::debug!(payload_chars = built.payload_chars(), "Built instruction");

        let request = LlmRequest::new(built.user, self.settings.model.clone())
            .with_system(built.system)
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature)
            .with_timeout(self.settings.timeout);

        let response = tokio::time::timeout(self.settings.timeout, self.client.complete(&request))
            .await
            .map_err(|_| {
                AppError::Llm(format!(
                    "Generation timed out after {:?}",
                    self.settings.timeout
                ))
            })??;

        let trimmed = response.content.trim();
        if trimmed.is_empty() {
            return Err(AppError::Llm(
                "Generation returned empty content".to_string(),
            ));
        }

        Ok(cap_draft(trimmed, self.settings.max_draft_chars))
    }
}

/// Cut a draft to `max_chars`, marking the cut with "...".
fn cap_draft(draft: &str, max_chars: usize) -> String {
    let capped = truncate_chars(draft, max_chars);
    if capped.len() < draft.len() {
        format!("{}...", capped)
    } else {
        draft.to_string()
    }
}
