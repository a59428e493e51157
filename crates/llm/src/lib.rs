//! Generation service integration for Navigator.
//!
//! This crate provides a transport-agnostic abstraction over the external
//! language model. Two transports share one trait:
//!
//! - **Hosted**: OpenAI-compatible chat-completion endpoint with bearer auth
//! - **Local**: a model runner spawned as a subprocess (stdin in, stdout out)
//!
//! # Example
//! ```no_run
//! use navigator_llm::{LlmClient, LlmRequest, providers::LocalRunnerClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LocalRunnerClient::new("ollama", vec!["run".into(), "llama3.2".into()]);
//! let request = LlmRequest::new("Hello, world!", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{HostedChatClient, LocalRunnerClient};
pub use types::ProviderType;
