//! End-to-end answer pipeline.
//!
//! triage → retrieval → grounded generation → reflection → structured result

use crate::rag::focus::{focus_areas, plan_today, plan_week};
use crate::rag::generate::GroundedGenerator;
use crate::rag::types::{AgeGroup, ResponseStatus, SafeResponse};
use crate::retriever::Retriever;
use navigator_safety::{classify, fallback, RiskLevel};
use std::sync::Arc;
use tracing::Instrument;

/// Shared, read-only handle that answers queries.
pub struct Navigator {
    retriever: Arc<Retriever>,
    generator: GroundedGenerator,
    top_k: usize,
}

impl Navigator {
    pub fn new(retriever: Arc<Retriever>, generator: GroundedGenerator, top_k: usize) -> Self {
        Self {
            retriever,
            generator,
            top_k,
        }
    }

    pub fn retriever(&self) -> &Arc<Retriever> {
        &self.retriever
    }

    /// Answer a query. Always returns a response.
    ///
    /// A crisis query short-circuits before any external call. A retrieval
    /// failure skips generation and uses the context-free fallback.
    pub async fn answer(&self, query_text: &str, age_group: AgeGroup) -> SafeResponse {
        let span = tracing::info_span!(
            "navigator",
            request_id = %uuid::Uuid::new_v4(),
            age_group = ?age_group
        );

        async move {
            let risk = classify(query_text);
            tracing::info!(
                risk = risk.as_str(),
                query_chars = query_text.chars().count(),
                "Triaged query"
            );

            if risk == RiskLevel::High {
                return SafeResponse::crisis();
            }

            let summary = match self.retriever.query(query_text, self.top_k).await {
                Ok(chunks) => {
                    self.generator
                        .generate(&chunks, query_text, age_group)
                        .await
                        .text
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Retrieval failed, using fallback");
                    fallback("")
                }
            };

            let focus = focus_areas(query_text);
            let response = SafeResponse {
                status: ResponseStatus::Safe,
                summary,
                plan_today: plan_today(&focus),
                plan_week: plan_week(&focus),
                focus_areas: focus,
            };

            tracing::info!(
                focus_areas = response.focus_areas.len(),
                summary_chars = response.summary.chars().count(),
                "Answered query"
            );

            response
        }
        .instrument(span)
        .await
    }
}
