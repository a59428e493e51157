//! Ask command handler.
//!
//! Runs one query through the full pipeline and prints the response as JSON.

use super::build_pipeline;
use clap::Args;
use navigator_core::{config::AppConfig, AppResult};
use navigator_knowledge::AgeGroup;

/// Answer one query and print the structured response
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The query text
    pub query: String,

    /// Reader the guidance is written for (teen, adult)
    #[arg(long, default_value = "adult")]
    pub age_group: String,

    /// Print compact single-line JSON
    #[arg(long)]
    pub compact: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let navigator = build_pipeline(config).await?;
        let response = navigator
            .answer(&self.query, AgeGroup::parse(&self.age_group))
            .await;

        let output = if self.compact {
            serde_json::to_string(&response)?
        } else {
            serde_json::to_string_pretty(&response)?
        };
        println!("{}", output);

        Ok(())
    }
}
