//! Handlebars template engine
//!
//! Templates are registered once from the configured directory at startup;
//! a template that fails to render surfaces as the 500 page rather than a
//! raw error string.

use std::path::Path;
use std::sync::Arc;

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use crate::utils::errors::{EscolarError, Result};

#[derive(Clone, Debug)]
pub struct TemplateEngine {
    registry: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Register every `*.html` file under `template_dir`
    pub fn new<P: AsRef<Path>>(template_dir: P) -> Result<Self> {
        let template_dir = template_dir.as_ref();

        // Directory registration silently registers nothing for a missing
        // path; a misconfigured template_dir has to abort startup instead.
        if !template_dir.is_dir() {
            return Err(EscolarError::Config(format!(
                "Template directory not found: {}",
                template_dir.display()
            )));
        }

        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        #[cfg(debug_assertions)]
        registry.set_dev_mode(true);

        registry
            .register_templates_directory(".html", template_dir)
            .map_err(|e| {
                EscolarError::Config(format!(
                    "Error registering templates directory {}: {}",
                    template_dir.display(),
                    e
                ))
            })?;

        tracing::info!(
            dir = %template_dir.display(),
            templates = registry.get_templates().len(),
            "Templates registered"
        );

        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    /// Render a registered template into an HTML response
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>> {
        let body = self.registry.render(name, data)?;
        Ok(Html(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn engine_with_template(name: &str, body: &str) -> (tempfile::TempDir, TemplateEngine) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(format!("{name}.html"));
        let mut file = std::fs::File::create(&path).expect("template file");
        file.write_all(body.as_bytes()).expect("write template");

        let engine = TemplateEngine::new(dir.path()).expect("engine");
        (dir, engine)
    }

    #[test]
    fn test_renders_registered_template() {
        let (_dir, engine) = engine_with_template("saludo", "<p>Hola {{nombre}}</p>");
        let Html(body) = engine
            .render("saludo", &json!({ "nombre": "Ana" }))
            .expect("render");
        assert_eq!(body, "<p>Hola Ana</p>");
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let (_dir, engine) = engine_with_template("saludo", "hola");
        assert!(engine.render("inexistente", &json!({})).is_err());
    }

    #[test]
    fn test_missing_directory_fails_construction() {
        let err = TemplateEngine::new("/definitely/not/a/dir").unwrap_err();
        assert!(matches!(err, EscolarError::Config(_)));
    }
}
