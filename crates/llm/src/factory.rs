//! LLM provider factory.
//!
//! Creates the generation client selected by configuration. Both transports
//! sit behind the same [`LlmClient`] trait, so the pipeline has a single code
//! path regardless of which one is active.

use crate::client::LlmClient;
use crate::providers::{HostedChatClient, LocalRunnerClient};
use crate::types::ProviderType;
use navigator_core::config::GenerationConfig;
use navigator_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the generation configuration.
///
/// # Arguments
/// * `config` - Generation settings (provider name, endpoints, runner command)
/// * `api_key` - Bearer credential, required by the hosted transport
///
/// # Errors
/// Returns error if:
/// - Provider is unknown
/// - The hosted transport is selected without a credential
/// - Client initialization fails
pub fn create_client(
    config: &GenerationConfig,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    match ProviderType::parse(&config.provider) {
        Some(ProviderType::Hosted) => {
            let api_key = api_key.ok_or_else(|| {
                AppError::Config(format!(
                    "Hosted provider requires API key (set {})",
                    config.hosted.api_key_env
                ))
            })?;
            let client = HostedChatClient::new(config.hosted.endpoint.clone(), api_key)?;
            tracing::info!(endpoint = %config.hosted.endpoint, "Using hosted generation provider");
            Ok(Arc::new(client))
        }
        Some(ProviderType::LocalRunner) => {
            if config.local.command.trim().is_empty() {
                return Err(AppError::Config(
                    "Local runner requires a command".to_string(),
                ));
            }
            let client =
                LocalRunnerClient::new(config.local.command.clone(), config.local.args.clone());
            tracing::info!(command = %config.local.command, "Using local runner generation provider");
            Ok(Arc::new(client))
        }
        None => Err(AppError::Config(format!(
            "Unknown provider: {}",
            config.provider
        ))),
    }
}
