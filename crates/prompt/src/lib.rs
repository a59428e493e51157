//! Instruction templates for Navigator.
//!
//! This crate provides:
//! - YAML-based instruction definitions
//! - Handlebars template rendering (strict: unknown variables are errors)
//! - The built-in grounded-answer instruction

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use defaults::grounded_definition;
pub use loader::load_prompt;
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition, REQUIRED_VARIABLES, TEMPLATE_VARIABLES};
