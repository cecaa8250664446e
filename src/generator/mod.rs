//! Generator module - renders pages, sitemap and robots.txt from posts

use anyhow::{Context as _, Result};
use chrono::Local;
use serde_yaml::Value;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{ContentLoader, MarkdownRenderer, Post};
use crate::templates::{PostData, SiteData, SitemapEntry, TemplateRenderer};
use crate::Blog;

/// Renders every public output of the blog. Posts are read fresh on each call.
pub struct Generator {
    config: SiteConfig,
    loader: ContentLoader,
    markdown: MarkdownRenderer,
    renderer: TemplateRenderer,
}

impl Generator {
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            config: blog.config.clone(),
            loader: ContentLoader::new(&blog.post_dir),
            markdown: MarkdownRenderer::new(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Home page listing every post
    pub fn render_index(&self) -> Result<String> {
        let posts: Vec<PostData> = self
            .loader
            .load_posts()
            .iter()
            .map(|p| self.post_data(p, false))
            .collect();
        tracing::debug!("Rendering index with {} posts", posts.len());

        let mut context = self.create_base_context();
        context.insert("posts", &posts);
        self.renderer.render("index.html", &context)
    }

    /// Detail page for one post, `None` when the post does not exist
    pub fn render_post(&self, name: &str) -> Result<Option<String>> {
        let Some(post) = self.loader.load_post(name)? else {
            return Ok(None);
        };

        let mut context = self.create_base_context();
        context.insert("post", &self.post_data(&post, true));
        let html = self
            .renderer
            .render("post.html", &context)
            .with_context(|| format!("Failed to render post {:?}", name))?;
        Ok(Some(html))
    }

    /// Entries for sitemap.xml
    pub fn sitemap_entries(&self) -> Vec<SitemapEntry> {
        self.loader
            .load_posts()
            .iter()
            .map(|post| SitemapEntry {
                slug: post.slug(),
                lastmod: post.last_modified(),
                image: self.image_url(post),
                title: post.metadata.get_str("title"),
            })
            .collect()
    }

    pub fn render_sitemap(&self) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", &self.sitemap_entries());
        context.insert("site_url", self.config.base_url());
        self.renderer.render("sitemap.xml", &context)
    }

    /// robots.txt; only production lets crawlers in
    pub fn render_robots(&self) -> String {
        let sitemap_url = format!("{}/sitemap.xml", self.config.base_url());

        let lines = if self.config.is_production() {
            vec![
                "User-agent: *".to_string(),
                "Allow: /".to_string(),
                "Disallow: /admin/".to_string(),
                "Disallow: /search/".to_string(),
                format!("Sitemap: {}", sitemap_url),
            ]
        } else {
            vec!["User-agent: *".to_string(), "Disallow: /".to_string()]
        };

        lines.join("\n")
    }

    fn create_base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                name: self.config.name.clone(),
                url: self.config.base_url().to_string(),
            },
        );
        context.insert("current_year", &Local::now().format("%Y").to_string());
        context
    }

    fn post_data(&self, post: &Post, absolute_image: bool) -> PostData {
        let mut metadata = post.metadata.clone();
        if absolute_image {
            let image = self.image_url(post).map(Value::String).unwrap_or(Value::Null);
            metadata.insert("image", image);
        }

        PostData {
            name: post.name.clone(),
            metadata: metadata.to_json(),
            content: self.markdown.render(&post.content),
        }
    }

    fn image_url(&self, post: &Post) -> Option<String> {
        if !post.metadata.is_present("image") {
            return None;
        }
        post.metadata
            .get_str("image")
            .map(|image| self.config.image_url(&image))
    }
}
