//! HTML rendering with Tera
//!
//! Templates are compiled into the binary and registered once when the host
//! is built. Template names end in `.html`, so Tera auto-escapes every
//! interpolated value unless a template marks it `safe`.

use crate::core::error::RenderError;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 7] = [
    ("base.html", include_str!("templates/base.html")),
    ("index.html", include_str!("templates/index.html")),
    ("grid.html", include_str!("templates/grid.html")),
    ("item.html", include_str!("templates/item.html")),
    ("pal.html", include_str!("templates/pal.html")),
    ("skills.html", include_str!("templates/skills.html")),
    ("not_found.html", include_str!("templates/not_found.html")),
];

/// Compiled page templates
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)
            .map_err(|e| RenderError::Setup {
                message: describe(&e),
            })?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        self.tera
            .render(template, context)
            .map_err(|e| RenderError::Template {
                template: template.to_string(),
                message: describe(&e),
            })
    }

    /// Render with a serializable struct as the whole context
    pub fn render_value<T: Serialize>(&self, template: &str, value: &T) -> Result<String, RenderError> {
        let context = Context::from_serialize(value).map_err(|e| RenderError::Template {
            template: template.to_string(),
            message: describe(&e),
        })?;
        self.render(template, &context)
    }

    pub fn templates(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

/// Tera keeps the useful detail in the source chain
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_register() {
        let renderer = Renderer::new().unwrap();
        let mut names = renderer.templates();
        names.sort();
        assert_eq!(names.len(), TEMPLATES.len());
        assert!(names.contains(&"grid.html"));
    }

    #[test]
    fn test_not_found_page_escapes_id() {
        let renderer = Renderer::new().unwrap();
        let mut context = Context::new();
        context.insert("kind", "item");
        context.insert("id", "<script>");
        let html = renderer.render("not_found.html", &context).unwrap();
        assert!(html.contains("No item found with the id &lt;script&gt;"));
    }

    #[test]
    fn test_missing_variable_is_template_error() {
        let renderer = Renderer::new().unwrap();
        let err = renderer.render("not_found.html", &Context::new()).unwrap_err();
        assert!(matches!(err, RenderError::Template { .. }));
    }
}
