//! Concrete embedding providers.

pub mod mock;
pub mod ollama;
pub mod trigram;

pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use trigram::TrigramProvider;
