//! Site configuration (_config.yml plus environment overrides)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::lint::LintConfig;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub name: String,
    pub url: String,
    pub bucket_endpoint: String,
    /// `production` enables indexing in robots.txt
    pub environment: String,

    // Directory
    pub post_dir: String,
    pub assets_dir: String,

    // Cache
    pub cache_ttl_secs: u64,

    // Linter thresholds
    pub lint: LintConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "YARB".to_string(),
            url: String::new(),
            bucket_endpoint: String::new(),
            environment: "development".to_string(),

            post_dir: "post".to_string(),
            assets_dir: "assets".to_string(),

            cache_ttl_secs: 3600,

            lint: LintConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Apply `SITE_URL`, `BUCKET_ENDPOINT` and `APP_ENV` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any lookup; empty values are ignored
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = get("SITE_URL") {
            self.url = url;
        }
        if let Some(endpoint) = get("BUCKET_ENDPOINT") {
            self.bucket_endpoint = endpoint;
        }
        if let Some(env) = get("APP_ENV") {
            self.environment = env;
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Public URL of an asset stored in the bucket
    pub fn image_url(&self, image: &str) -> String {
        format!("{}/{}", self.bucket_endpoint, image)
    }
}
