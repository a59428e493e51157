//! Embedding providers.
//!
//! One provider instance embeds the whole corpus at build time and then
//! every query, so the vectors stay comparable.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
pub use providers::{MockProvider, OllamaProvider, TrigramProvider};
