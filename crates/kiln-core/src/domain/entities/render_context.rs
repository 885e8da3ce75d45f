use std::collections::HashMap;

use crate::domain::{
    defaults::{self, BASE_NAME, PACKAGE_NAME, PROJECT_NAME},
    entities::project::Project,
};

/// Context for rendering a template resource.
///
/// A **Value Object** holding every placeholder a module template may use.
/// Immutable after creation; `with_variable` returns a new instance.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `packageName` | "tech.jhipster.chips" | config, default table |
/// | `packageNamePath` | "tech/jhipster/chips" | derived |
/// | `baseName` | "chips" | config, default table |
/// | `BaseName` | "Chips" | derived, upper-first |
/// | `projectName` | "Chips Project" | config, default table |
///
/// Every other string, integer and boolean config entry is exposed under its
/// own key.
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Build the context for a project, filling recognised keys from the
    /// default table when the project has not set them.
    pub fn from_project(project: &Project) -> Self {
        let mut variables: HashMap<String, String> = project
            .config()
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();

        for key in [PACKAGE_NAME, BASE_NAME, PROJECT_NAME] {
            if let Some(default) = defaults::default_config(key) {
                variables
                    .entry(key.to_string())
                    .or_insert_with(|| default.to_string());
            }
        }

        let base_name = variables.get(BASE_NAME).cloned().unwrap_or_default();
        variables.insert("BaseName".to_string(), upper_first(&base_name));
        variables.insert("packageNamePath".to_string(), project.package_name_path());

        Self { variables }
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace `{{variable}}` placeholders.
    ///
    /// - `{{unknown}}` stays as a literal (no error)
    /// - repeated placeholders are all replaced
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();

        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::builder()
            .folder(std::env::temp_dir().join("kiln-render"))
            .package_name("tech.jhipster.chips")
            .base_name("chips")
            .config("serverPort", 9000)
            .build()
            .unwrap()
    }

    #[test]
    fn from_project_exposes_package_and_names() {
        let ctx = RenderContext::from_project(&project());

        assert_eq!(ctx.get("packageName"), Some("tech.jhipster.chips"));
        assert_eq!(ctx.get("packageNamePath"), Some("tech/jhipster/chips"));
        assert_eq!(ctx.get("BaseName"), Some("Chips"));
        assert_eq!(ctx.get("serverPort"), Some("9000"));
        assert_eq!(ctx.get("projectName"), Some("JHipster Project"));
    }

    #[test]
    fn defaults_fill_unset_keys() {
        let project = Project::new(std::env::temp_dir()).unwrap();
        let ctx = RenderContext::from_project(&project);

        assert_eq!(ctx.get("packageName"), Some("com.mycompany.myapp"));
        assert_eq!(ctx.get("baseName"), Some("jhipster"));
    }

    #[test]
    fn render_replaces_known_and_keeps_unknown() {
        let ctx = RenderContext::from_project(&project());
        let rendered = ctx.render("package {{packageName}};\nclass {{BaseName}}App {} // {{unknown}} {{baseName}}");

        assert_eq!(
            rendered,
            "package tech.jhipster.chips;\nclass ChipsApp {} // {{unknown}} chips"
        );
    }
}
