//! Serve command handler.
//!
//! Builds the pipeline once and serves it over HTTP until Ctrl-C.

use super::build_pipeline;
use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Args;
use navigator_core::config::AppConfig;
use navigator_core::text::truncate_chars;
use navigator_knowledge::{AgeGroup, Navigator, RetrievedChunk, SafeResponse};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

const SAMPLE_CHUNK_CHARS: usize = 300;
const SAMPLE_EMBEDDING_TEXT_CHARS: usize = 200;

/// Serve the navigator over HTTP
#[derive(Args, Debug)]
pub struct ServeCommand {}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing serve command");

        let navigator = build_pipeline(config).await?;
        let stats = navigator.retriever().stats();
        tracing::info!(
            chunks = stats.total_chunks,
            embedding_model = %stats.embedding_model,
            fingerprint = %stats.fingerprint,
            "Index ready"
        );

        let state = AppState {
            navigator: Arc::new(navigator),
            debug_top_k: config.retrieval.debug_top_k,
        };
        let app = router(state);

        let addr: SocketAddr = config
            .bind
            .parse()
            .with_context(|| format!("invalid bind address {}", config.bind))?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("Listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server shutdown")?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    navigator: Arc<Navigator>,
    debug_top_k: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/navigator", post(navigate))
        .route("/debug/kb", get(debug_kb))
        .route("/debug/embeddings", get(debug_embeddings))
        .route("/debug/search", get(debug_search))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[derive(Debug, Deserialize)]
struct NavigatorRequest {
    #[serde(alias = "text")]
    query_text: String,
    #[serde(default)]
    age_group: AgeGroup,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    chunks: usize,
    embedding_model: String,
    fingerprint: String,
}

#[derive(Debug, Serialize)]
struct DebugKbBody {
    total_chunks: usize,
    sample_chunk: String,
}

#[derive(Debug, Serialize)]
struct DebugEmbeddingsBody {
    total_chunks: usize,
    embedding_shape: usize,
    embedding_model: String,
    sample_text: String,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
    top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SearchBody {
    query: String,
    matches: Vec<RetrievedChunk>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let stats = state.navigator.retriever().stats();
    Json(HealthBody {
        status: "ok",
        chunks: stats.total_chunks,
        embedding_model: stats.embedding_model,
        fingerprint: stats.fingerprint,
    })
}

async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigatorRequest>,
) -> Json<SafeResponse> {
    Json(
        state
            .navigator
            .answer(&request.query_text, request.age_group)
            .await,
    )
}

async fn debug_kb(State(state): State<AppState>) -> Json<DebugKbBody> {
    Json(DebugKbBody {
        total_chunks: state.navigator.retriever().len(),
        sample_chunk: first_chunk_excerpt(&state, SAMPLE_CHUNK_CHARS),
    })
}

fn first_chunk_excerpt(state: &AppState, max_chars: usize) -> String {
    state
        .navigator
        .retriever()
        .chunks()
        .first()
        .map(|chunk| truncate_chars(&chunk.text, max_chars).to_string())
        .unwrap_or_default()
}

async fn debug_embeddings(State(state): State<AppState>) -> Json<DebugEmbeddingsBody> {
    let stats = state.navigator.retriever().stats();
    Json(DebugEmbeddingsBody {
        total_chunks: stats.total_chunks,
        embedding_shape: stats.dimensions,
        embedding_model: stats.embedding_model,
        sample_text: first_chunk_excerpt(&state, SAMPLE_EMBEDDING_TEXT_CHARS),
    })
}

async fn debug_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchBody>, (StatusCode, Json<ErrorBody>)> {
    let top_k = params.top_k.unwrap_or(state.debug_top_k);
    match state.navigator.retriever().query(&params.q, top_k).await {
        Ok(matches) => Ok(Json(SearchBody {
            query: params.q,
            matches,
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Debug search failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    message: e.to_string(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_core::config::GenerationConfig;
    use navigator_core::AppResult;
    use navigator_knowledge::embeddings::MockProvider;
    use navigator_knowledge::{segment, GroundedGenerator, ResponseStatus, Retriever};
    use navigator_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
    use std::time::Duration;

    const CORPUS: &str = "\
SLEEP
========================================
Sleep difficulties often show up as trouble falling asleep, waking during the night, or feeling tired the next day.

A steady wake-up time, a dim and cool bedroom, and less screen light in the evening help the body settle into rest.
========================================
STRESS
========================================
Stress builds when demands at work or school outpace the time and energy available, and it often shows up as irritability.
";

    const REPLY: &str = "A trusted professional can offer support when nights feel long.";

    struct CannedClient;

    #[async_trait::async_trait]
    impl LlmClient for CannedClient {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: REPLY.to_string(),
                model: request.model.clone(),
                usage: LlmUsage::new(5, 12),
            })
        }
    }

    async fn test_state(provider: Arc<MockProvider>) -> AppState {
        let retriever = Retriever::build(segment(CORPUS), provider, Duration::from_secs(5))
            .await
            .unwrap();
        let generator =
            GroundedGenerator::from_config(Arc::new(CannedClient), &GenerationConfig::default())
                .unwrap();
        AppState {
            navigator: Arc::new(Navigator::new(Arc::new(retriever), generator, 1)),
            debug_top_k: 3,
        }
    }

    #[test]
    fn test_request_accepts_text_alias() {
        let request: NavigatorRequest =
            serde_json::from_str(r#"{"text": "hard to sleep"}"#).unwrap();
        assert_eq!(request.query_text, "hard to sleep");
        assert_eq!(request.age_group, AgeGroup::Adult);
    }

    #[test]
    fn test_request_age_group_parsing() {
        let teen: NavigatorRequest =
            serde_json::from_str(r#"{"query_text": "exams", "age_group": "Teen"}"#).unwrap();
        assert_eq!(teen.age_group, AgeGroup::Teen);

        let unknown: NavigatorRequest =
            serde_json::from_str(r#"{"query_text": "exams", "age_group": "senior"}"#).unwrap();
        assert_eq!(unknown.age_group, AgeGroup::Adult);
    }

    #[test]
    fn test_request_requires_query() {
        assert!(serde_json::from_str::<NavigatorRequest>(r#"{"age_group": "teen"}"#).is_err());
    }

    #[tokio::test]
    async fn test_health_reports_index() {
        let state = test_state(Arc::new(MockProvider::new(16))).await;
        let expected = state.navigator.retriever().stats();

        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.chunks, 3);
        assert_eq!(body.embedding_model, expected.embedding_model);
        assert_eq!(body.fingerprint, expected.fingerprint);
    }

    #[tokio::test]
    async fn test_navigate_safe_and_crisis() {
        let state = test_state(Arc::new(MockProvider::new(16))).await;

        let request = NavigatorRequest {
            query_text: "I keep waking up and can't sleep".to_string(),
            age_group: AgeGroup::Adult,
        };
        let Json(safe) = navigate(State(state.clone()), Json(request)).await;
        assert_eq!(safe.status, ResponseStatus::Safe);
        assert_eq!(safe.summary, REPLY);
        assert!(!safe.plan_today.is_empty());

        let request = NavigatorRequest {
            query_text: "sometimes I think about ending my life".to_string(),
            age_group: AgeGroup::Adult,
        };
        let Json(crisis) = navigate(State(state), Json(request)).await;
        assert_eq!(crisis, SafeResponse::crisis());
    }

    #[tokio::test]
    async fn test_debug_kb_sample() {
        let state = test_state(Arc::new(MockProvider::new(16))).await;
        let first = state.navigator.retriever().chunks()[0].text.clone();

        let Json(body) = debug_kb(State(state)).await;
        assert_eq!(body.total_chunks, 3);
        assert_eq!(body.sample_chunk, first);
    }

    #[tokio::test]
    async fn test_debug_embeddings_shape() {
        let state = test_state(Arc::new(MockProvider::new(16))).await;
        let first = state.navigator.retriever().chunks()[0].text.clone();
        let model = state.navigator.retriever().stats().embedding_model;

        let Json(body) = debug_embeddings(State(state)).await;
        assert_eq!(body.total_chunks, 3);
        assert_eq!(body.embedding_shape, 16);
        assert_eq!(body.embedding_model, model);
        assert_eq!(body.sample_text, truncate_chars(&first, 200));
        assert!(body.sample_text.chars().count() <= 200);
    }

    #[tokio::test]
    async fn test_debug_search_defaults_and_failure() {
        let provider = Arc::new(MockProvider::new(16));
        let state = test_state(provider.clone()).await;

        let params = SearchParams {
            q: "waking during the night".to_string(),
            top_k: None,
        };
        let Json(body) = debug_search(State(state.clone()), Query(params))
            .await
            .unwrap();
        assert_eq!(body.query, "waking during the night");
        assert_eq!(body.matches.len(), 3);

        provider.set_failing(true);
        let params = SearchParams {
            q: "anything".to_string(),
            top_k: Some(1),
        };
        let Err((status, Json(error))) = debug_search(State(state), Query(params)).await else {
            panic!("expected a retrieval failure");
        };
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(error.message.contains("Retrieval"));
    }
}
