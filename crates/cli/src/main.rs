//! Navigator CLI
//!
//! Main entry point for the navigator binary.
//! Serves the grounded support pipeline over HTTP and exposes it for
//! one-off queries and corpus inspection from the terminal.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, KbCommand, ServeCommand};
use navigator_core::{config::AppConfig, logging};
use std::path::PathBuf;

/// Navigator - grounded, safety-gated support guidance
#[derive(Parser, Debug)]
#[command(name = "navigator")]
#[command(about = "Grounded, safety-gated support guidance over a local corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "NAVIGATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the knowledge corpus
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// HTTP bind address (host:port)
    #[arg(long, global = true)]
    bind: Option<String>,

    /// Generation provider (hosted, local)
    #[arg(long, global = true)]
    generation_provider: Option<String>,

    /// Embedding provider (trigram, ollama, mock)
    #[arg(long, global = true)]
    embedding_provider: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the navigator over HTTP
    Serve(ServeCommand),

    /// Answer one query and print the structured response
    Ask(AskCommand),

    /// Inspect the knowledge corpus and its index
    Kb(KbCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load_with_file(cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.corpus,
        cli.bind,
        cli.generation_provider,
        cli.embedding_provider,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color, config.log_json)?;

    tracing::info!("Navigator starting");
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Corpus: {:?}", config.corpus_path);
    tracing::debug!("Generation provider: {}", config.generation.provider);
    tracing::debug!("Embedding provider: {}", config.embedding.provider);

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Ask(_) => "ask",
        Commands::Kb(_) => "kb",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await.map_err(Into::into),
        Commands::Kb(cmd) => cmd.execute(&config).await.map_err(Into::into),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {:#}", e),
    }

    result
}
