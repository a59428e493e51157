//! Knowledge corpus command handler.
//!
//! Builds the index the same way `serve` does and reports on it.

use clap::{Args, Subcommand};
use navigator_core::{config::AppConfig, AppResult};

/// Inspect the knowledge corpus and its index
#[derive(Args, Debug)]
pub struct KbCommand {
    #[command(subcommand)]
    pub action: KbAction,
}

#[derive(Subcommand, Debug)]
pub enum KbAction {
    /// Show corpus and index statistics
    Stats(KbStatsCommand),
    /// Run a raw retrieval query
    Search(KbSearchCommand),
}

/// Show corpus and index statistics
#[derive(Args, Debug)]
pub struct KbStatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run a raw retrieval query
#[derive(Args, Debug)]
pub struct KbSearchCommand {
    /// Query text
    pub query: String,

    /// Number of results (default: retrieval.debugTopK)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KbCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            KbAction::Stats(cmd) => cmd.execute(config).await,
            KbAction::Search(cmd) => cmd.execute(config).await,
        }
    }
}

impl KbStatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing kb stats command");

        let retriever = navigator_knowledge::build_retriever(config).await?;
        let stats = retriever.stats();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("Corpus: {}", config.corpus_path.display());
            println!("  Chunks: {}", stats.total_chunks);
            println!(
                "  Embedding: {} ({}, {} dimensions)",
                stats.embedding_model, stats.embedding_provider, stats.dimensions
            );
            println!("  Fingerprint: {}", stats.fingerprint);
            println!("  Built at: {}", stats.built_at.to_rfc3339());
        }

        Ok(())
    }
}

impl KbSearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing kb search command");

        let top_k = self.top_k.unwrap_or(config.retrieval.debug_top_k);
        let retriever = navigator_knowledge::build_retriever(config).await?;
        let matches = retriever.query(&self.query, top_k).await?;

        if self.json {
            let output = serde_json::json!({
                "query": self.query,
                "matches": matches,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if matches.is_empty() {
            println!("No matches");
        } else {
            for (rank, hit) in matches.iter().enumerate() {
                println!("{}. [chunk {}] distance {:.4}", rank + 1, hit.id, hit.distance);
                println!("   {}", hit.text);
            }
        }

        Ok(())
    }
}
