//! Prompt types for Navigator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variables every grounded instruction template must reference.
pub const REQUIRED_VARIABLES: [&str; 2] = ["context", "query"];

/// Every variable supplied when a grounded instruction is rendered.
pub const TEMPLATE_VARIABLES: [&str; 3] = ["audience", "context", "query"];

/// An instruction definition, built in or loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// System instruction sent alongside the rendered template
    pub system: String,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// A fully built prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message
    pub system: String,

    /// User message
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Template variables that were resolved
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: BTreeMap<String, String>,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(
        system: String,
        user: String,
        source_prompt_id: String,
        resolved_variables: BTreeMap<String, String>,
    ) -> Self {
        Self {
            system,
            user,
            metadata: BuiltPromptMetadata {
                source_prompt_id,
                resolved_variables,
            },
        }
    }

    /// Total characters in the payload sent to the model.
    pub fn payload_chars(&self) -> usize {
        self.system.chars().count() + self.user.chars().count()
    }
}
