//! Prompt loader for YAML instruction overrides.

use crate::builder::render_template;
use crate::types::{PromptDefinition, REQUIRED_VARIABLES, TEMPLATE_VARIABLES};
use navigator_core::{AppError, AppResult};
use std::collections::BTreeMap;
use std::path::Path;

/// Load an instruction definition from a YAML file.
///
/// # Example
/// ```no_run
/// use navigator_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("prompts/grounded.yml"))?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(path: &Path) -> AppResult<PromptDefinition> {
    tracing::debug!("Loading prompt from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Prompt(format!("Prompt file not found: {:?}", path)));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e)))?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e)))?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    for name in REQUIRED_VARIABLES {
        if !def.template.contains(&format!("{{{{{}}}}}", name)) {
            return Err(AppError::Prompt(format!(
                "Prompt template must reference {{{{{}}}}}",
                name
            )));
        }
    }

    // Strict mode rejects any placeholder outside the supplied set
    let sample: BTreeMap<String, String> = TEMPLATE_VARIABLES
        .iter()
        .map(|name| (name.to_string(), format!("sample {}", name)))
        .collect();
    render_template(&def.template, &sample).map_err(|e| {
        AppError::Prompt(format!("Prompt template {} does not render: {}", def.id, e))
    })?;

    Ok(())
}
