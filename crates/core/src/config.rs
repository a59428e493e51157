//! Configuration management for Navigator.
//!
//! Configuration is layered from (lowest to highest precedence):
//! - Built-in defaults
//! - A YAML config file (`navigator.yaml` or `NAVIGATOR_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! The resulting `AppConfig` is validated once at startup; an invalid
//! configuration or a missing credential stops the process before it serves.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Config file picked up from the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "navigator.yaml";

/// Known generation transports.
pub const GENERATION_PROVIDERS: [&str; 2] = ["hosted", "local"];

/// Known embedding providers.
pub const EMBEDDING_PROVIDERS: [&str; 3] = ["trigram", "ollama", "mock"];

const MAX_GENERATION_TIMEOUT_SECS: u64 = 120;
const MAX_EMBEDDING_TIMEOUT_SECS: u64 = 30;
const RECOMMENDED_GENERATION_TIMEOUT_SECS: u64 = 30;
const RECOMMENDED_EMBEDDING_TIMEOUT_SECS: u64 = 5;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Path to the knowledge corpus text file
    pub corpus_path: PathBuf,

    /// Address the HTTP server binds to
    pub bind: String,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Emit logs as JSON lines
    pub log_json: bool,

    pub retrieval: RetrievalConfig,

    pub embedding: EmbeddingConfig,

    pub generation: GenerationConfig,
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetrievalConfig {
    /// Chunks used to ground each answer
    pub top_k: usize,

    /// Default result count for the debug search surface
    pub debug_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 1,
            debug_top_k: 3,
        }
    }
}

/// Embedding provider settings.
///
/// The same provider instance embeds the corpus and every query, so these
/// settings are fixed for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbeddingConfig {
    /// Provider name: "trigram", "ollama", "mock"
    pub provider: String,

    /// Ollama model name; the trigram provider only accepts "trigram-v1"
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Endpoint for network providers
    pub endpoint: Option<String>,

    /// Timeout for a single embedding request, in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            endpoint: None,
            timeout_secs: RECOMMENDED_EMBEDDING_TIMEOUT_SECS,
        }
    }
}

impl EmbeddingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Generation settings shared by both transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Transport: "hosted" or "local"
    pub provider: String,

    /// Model identifier passed to the transport
    pub model: String,

    /// Wall-clock bound for one generation call, in seconds
    pub timeout_secs: u64,

    pub max_tokens: u32,

    pub temperature: f32,

    /// Context characters kept before building the instruction
    pub max_context_chars: usize,

    /// Query characters kept before building the instruction
    pub max_query_chars: usize,

    /// Draft characters kept before reflection
    pub max_draft_chars: usize,

    /// Optional YAML instruction template overriding the built-in one
    pub prompt_file: Option<PathBuf>,

    pub hosted: HostedConfig,

    pub local: LocalRunnerConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: "hosted".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            timeout_secs: 20,
            max_tokens: 300,
            temperature: 0.4,
            max_context_chars: 500,
            max_query_chars: 300,
            max_draft_chars: 1000,
            prompt_file: None,
            hosted: HostedConfig::default(),
            local: LocalRunnerConfig::default(),
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Hosted chat-completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostedConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    pub endpoint: String,

    /// Environment variable holding the bearer credential
    pub api_key_env: String,
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
        }
    }
}

/// Local model runner invoked as a subprocess.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalRunnerConfig {
    /// Executable to spawn
    pub command: String,

    /// Arguments passed before the instruction is written to stdin
    pub args: Vec<String>,
}

impl Default for LocalRunnerConfig {
    fn default() -> Self {
        Self {
            command: "ollama".to_string(),
            args: vec!["run".to_string(), "llama3.2".to_string()],
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    corpus: Option<CorpusSection>,
    server: Option<ServerSection>,
    logging: Option<LoggingConfig>,
    retrieval: Option<RetrievalConfig>,
    embedding: Option<EmbeddingConfig>,
    generation: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CorpusSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerSection {
    bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
    json: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            corpus_path: PathBuf::from("knowledge_base/kb.txt"),
            bind: "127.0.0.1:8000".to_string(),
            log_level: None,
            verbose: false,
            no_color: false,
            log_json: false,
            retrieval: RetrievalConfig::default(),
            embedding: EmbeddingConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML file and environment variables.
    ///
    /// Environment variables:
    /// - `NAVIGATOR_CONFIG`: Path to config file
    /// - `NAVIGATOR_CORPUS`: Corpus file path
    /// - `NAVIGATOR_BIND`: HTTP bind address
    /// - `NAVIGATOR_GENERATION_PROVIDER`: "hosted" or "local"
    /// - `NAVIGATOR_EMBEDDING_PROVIDER`: "trigram", "ollama" or "mock"
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use navigator_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Corpus: {:?}", config.corpus_path);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with_file(None)
    }

    /// Like [`AppConfig::load`], with an explicit config file taking the
    /// place of `NAVIGATOR_CONFIG`.
    pub fn load_with_file(config_file: Option<PathBuf>) -> AppResult<Self> {
        let explicit = config_file
            .or_else(|| std::env::var("NAVIGATOR_CONFIG").ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                Self::load_from_file(&path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        // Environment variables override YAML config
        if let Ok(corpus) = std::env::var("NAVIGATOR_CORPUS") {
            config.corpus_path = PathBuf::from(corpus);
        }

        if let Ok(bind) = std::env::var("NAVIGATOR_BIND") {
            config.bind = bind;
        }

        if let Ok(provider) = std::env::var("NAVIGATOR_GENERATION_PROVIDER") {
            config.generation.provider = provider;
        }

        if let Ok(provider) = std::env::var("NAVIGATOR_EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Build a configuration from defaults merged with one YAML file.
    pub fn load_from_file(path: &Path) -> AppResult<Self> {
        let mut config = Self::default().merge_yaml(path)?;
        config.config_file = Some(path.to_path_buf());
        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(path) = config_file.corpus.and_then(|c| c.path) {
            result.corpus_path = PathBuf::from(path);
        }

        if let Some(bind) = config_file.server.and_then(|s| s.bind) {
            result.bind = bind;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(json) = logging.json {
                result.log_json = json;
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            result.retrieval = retrieval;
        }

        if let Some(embedding) = config_file.embedding {
            result.embedding = embedding;
        }

        if let Some(generation) = config_file.generation {
            result.generation = generation;
        }

        tracing::debug!("Merged config file {:?}", path);

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the file and the environment.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        corpus_path: Option<PathBuf>,
        bind: Option<String>,
        generation_provider: Option<String>,
        embedding_provider: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(corpus_path) = corpus_path {
            self.corpus_path = corpus_path;
        }

        if let Some(bind) = bind {
            self.bind = bind;
        }

        if let Some(provider) = generation_provider {
            self.generation.provider = provider;
        }

        if let Some(provider) = embedding_provider {
            self.embedding.provider = provider;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the hosted generation credential from the environment.
    pub fn resolve_api_key(&self) -> AppResult<String> {
        let env_var = &self.generation.hosted.api_key_env;
        match std::env::var(env_var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::Config(format!(
                "API key not found in environment variable: {}",
                env_var
            ))),
        }
    }

    /// Validate configuration before any component is built.
    pub fn validate(&self) -> AppResult<()> {
        let generation = &self.generation;
        let embedding = &self.embedding;

        if !GENERATION_PROVIDERS.contains(&generation.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown generation provider: {}. Supported: {}",
                generation.provider,
                GENERATION_PROVIDERS.join(", ")
            )));
        }

        if !EMBEDDING_PROVIDERS.contains(&embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                embedding.provider,
                EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if embedding.dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be greater than zero".to_string(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(AppError::Config(
                "retrieval.topK must be at least 1".to_string(),
            ));
        }

        check_timeout("generation.timeoutSecs", generation.timeout_secs, MAX_GENERATION_TIMEOUT_SECS)?;
        check_timeout("embedding.timeoutSecs", embedding.timeout_secs, MAX_EMBEDDING_TIMEOUT_SECS)?;

        if generation.timeout_secs > RECOMMENDED_GENERATION_TIMEOUT_SECS {
            tracing::warn!(
                "Generation timeout {}s exceeds the recommended {}s",
                generation.timeout_secs,
                RECOMMENDED_GENERATION_TIMEOUT_SECS
            );
        }
        if embedding.timeout_secs > RECOMMENDED_EMBEDDING_TIMEOUT_SECS {
            tracing::warn!(
                "Embedding timeout {}s exceeds the recommended {}s",
                embedding.timeout_secs,
                RECOMMENDED_EMBEDDING_TIMEOUT_SECS
            );
        }

        if generation.max_tokens == 0
            || generation.max_context_chars == 0
            || generation.max_query_chars == 0
            || generation.max_draft_chars == 0
        {
            return Err(AppError::Config(
                "Generation limits (maxTokens, maxContextChars, maxQueryChars, maxDraftChars) must be greater than zero"
                    .to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(AppError::Config(format!(
                "Temperature must be within 0.0-2.0, got {}",
                generation.temperature
            )));
        }

        match generation.provider.as_str() {
            "hosted" => {
                self.resolve_api_key()?;
            }
            "local" => {
                if generation.local.command.trim().is_empty() {
                    return Err(AppError::Config(
                        "generation.local.command must not be empty".to_string(),
                    ));
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn check_timeout(name: &str, value: u64, max: u64) -> AppResult<()> {
    if value == 0 || value > max {
        return Err(AppError::Config(format!(
            "{} must be within 1-{} seconds, got {}",
            name, max, value
        )));
    }
    Ok(())
}
