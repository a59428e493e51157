//! Prompt builder for rendering instruction templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use handlebars::Handlebars;
use navigator_core::{AppError, AppResult};
use std::collections::BTreeMap;

/// Build a prompt from a definition and template variables.
///
/// The template is rendered in strict mode, so a placeholder with no
/// matching variable is an error rather than an empty string.
///
/// # Example
/// ```
/// use navigator_prompt::{build_prompt, grounded_definition};
/// use std::collections::BTreeMap;
///
/// let mut vars = BTreeMap::new();
/// vars.insert("audience".to_string(), "an adult".to_string());
/// vars.insert("context".to_string(), "Sleep hygiene basics.".to_string());
/// vars.insert("query".to_string(), "I can't sleep".to_string());
///
/// let built = build_prompt(&grounded_definition(), vars).unwrap();
/// assert!(built.user.contains("I can't sleep"));
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: BTreeMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!(prompt_id = %definition.id, "Building prompt");

    let user = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt::new(
        definition.system.clone(),
        user,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
pub(crate) fn render_template(
    template: &str,
    variables: &BTreeMap<String, String>,
) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
