//! MiniJinja-based template implementation

use crate::{PromptError, Result};
use minijinja::Environment;

/// A named prompt template backed by MiniJinja
///
/// The template source is syntax-checked when the template is created, so a
/// constructed `JinjaTemplate` only fails to render on missing or mistyped
/// variables (undefined variables render as empty strings).
///
/// # Template Syntax
///
/// - Variables: `{{ variable }}`
/// - Filters: `{{ name | upper }}`
/// - Conditionals: `{% if condition %}...{% endif %}`
/// - Loops: `{% for item in items %}...{% endfor %}`
#[derive(Clone)]
pub struct JinjaTemplate {
    name: String,
    source: String,
}

impl JinjaTemplate {
    /// Create a template, checking the source for syntax errors
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();

        {
            let mut env = Environment::new();
            env.add_template(&name, &source)
                .map_err(|e| PromptError::TemplateParseFailed {
                    name: name.clone(),
                    detail: e.to_string(),
                })?;
        }

        Ok(Self { name, source })
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given variables
    pub fn render(&self, vars: &serde_json::Value) -> Result<String> {
        let env = Environment::new();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(&self.source, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
