//! yarb: a minimal file-based markdown blog
//!
//! Posts are markdown files with YAML front-matter in a single directory.
//! They are rendered on each request into an index and post pages, plus
//! `sitemap.xml` and `robots.txt`. The [`lint`] module checks front-matter
//! against SEO thresholds before commit.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod lint;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub post_dir: PathBuf,
    /// Static assets served under /assets
    pub assets_dir: PathBuf,
}

impl Blog {
    /// Load a blog from a directory: `_config.yml` if present, then environment overrides
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Build from an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let post_dir = base_dir.join(&config.post_dir);
        let assets_dir = base_dir.join(&config.assets_dir);

        Self {
            config,
            base_dir,
            post_dir,
            assets_dir,
        }
    }
}
