//! Simple variable substitution renderer.

use kiln_core::{application::ports::TemplateRenderer, domain::RenderContext, error::KilnResult};
use tracing::instrument;

/// Replaces `{{key}}` placeholders from the render context. Unknown keys are
/// left verbatim so that Java and XML braces survive.
#[derive(Debug, Clone, Copy)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(len = template.len()))]
    fn render(&self, template: &str, context: &RenderContext) -> KilnResult<String> {
        Ok(context.render(template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_keys_only() {
        let context = RenderContext::new()
            .with_variable("packageName", "tech.jhipster.chips")
            .with_variable("baseName", "chips");

        let rendered = SimpleRenderer::new()
            .render(
                "package {{packageName}};\nclass {{BaseName}}App {{ {{unknown}} }}",
                &context,
            )
            .unwrap();

        assert_eq!(
            rendered,
            "package tech.jhipster.chips;\nclass {{BaseName}}App {{ {{unknown}} }}"
        );
    }
}
