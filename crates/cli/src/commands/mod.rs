//! Command handlers for the navigator binary.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod kb;
pub mod serve;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use kb::KbCommand;
pub use serve::ServeCommand;

use navigator_core::{config::AppConfig, AppResult};
use navigator_knowledge::Navigator;
use navigator_llm::ProviderType;

/// Validate the configuration, then build the generation client and the
/// full pipeline. Any failure here stops the process before it answers.
pub async fn build_pipeline(config: &AppConfig) -> AppResult<Navigator> {
    config.validate()?;

    let api_key = match ProviderType::parse(&config.generation.provider) {
        Some(ProviderType::Hosted) => Some(config.resolve_api_key()?),
        _ => None,
    };
    let client = navigator_llm::create_client(&config.generation, api_key.as_deref())?;

    navigator_knowledge::build_navigator(config, client).await
}
