//! MiniJinja-backed prompt template

use crate::error::Result;
use minijinja::Environment;
use serde::Serialize;

/// A named Jinja template string
///
/// Syntax is standard Jinja2: `{{ variable }}`, `{% for %}`, `{% if %}` and
/// the MiniJinja built-in filters such as `join`.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    name: &'static str,
    source: &'static str,
}

impl PromptTemplate {
    /// Create a template from static source text
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    /// Template name, used in error messages
    pub fn name(&self) -> &str {
        self.name
    }

    /// Render with the given variables
    pub fn render<S: Serialize>(&self, vars: S) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(self.name, self.source)?;
        let template = env.get_template(self.name)?;
        Ok(template.render(vars)?)
    }
}
