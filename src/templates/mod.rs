//! Built-in blog templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is off; templates
//! escape metadata explicitly with the `escape_xml` filter and insert
//! rendered markdown as-is.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("sitemap.xml", include_str!("blog/sitemap.xml")),
        ])?;

        tera.register_filter("escape_xml", escape_xml_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape XML/HTML special characters. Scalars are stringified
/// and null becomes the empty string.
fn escape_xml_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = match value {
        tera::Value::String(s) => s.clone(),
        tera::Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(tera::Value::String(escape_xml(&s)))
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub name: String,
    pub metadata: serde_json::Value,
    /// Rendered HTML body
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SitemapEntry {
    pub slug: String,
    pub lastmod: Option<String>,
    pub image: Option<String>,
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteData {
        SiteData {
            name: "YARB".to_string(),
            url: "https://blog.example.com".to_string(),
        }
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_post_template_escapes_metadata_not_content() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &site());
        context.insert("current_year", "2024");
        context.insert(
            "post",
            &PostData {
                name: "hello".to_string(),
                metadata: serde_json::json!({ "title": "Fish & <Chips>" }),
                content: "<p>Body</p>".to_string(),
            },
        );

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("<h1>Fish &amp; &lt;Chips&gt;</h1>"));
        assert!(html.contains("<p>Body</p>"));
        assert!(!html.contains("og:image"));
    }

    #[test]
    fn test_index_lists_posts() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &site());
        context.insert("current_year", "2024");
        context.insert(
            "posts",
            &vec![PostData {
                name: "first".to_string(),
                metadata: serde_json::json!({ "title": "First post", "created_at": "2024-01-01" }),
                content: String::new(),
            }],
        );

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains(r#"<a href="/post/first">First post</a>"#));
        assert!(html.contains("2024-01-01"));
    }

    #[test]
    fn test_escape_filter_stringifies_scalars() {
        let args = HashMap::new();
        let out = escape_xml_filter(&tera::Value::from(42), &args).unwrap();
        assert_eq!(out, tera::Value::String("42".to_string()));
        let out = escape_xml_filter(&tera::Value::Null, &args).unwrap();
        assert_eq!(out, tera::Value::String(String::new()));
    }
}
