//! Content loader - loads posts from the post directory

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};

/// Loads posts from a single flat directory of markdown files
pub struct ContentLoader {
    post_dir: PathBuf,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(post_dir: P) -> Self {
        Self {
            post_dir: post_dir.as_ref().to_path_buf(),
        }
    }

    /// Names (file stems) of every markdown file in the post directory.
    /// A missing directory yields no posts.
    pub fn list_posts(&self) -> Vec<String> {
        if !self.post_dir.is_dir() {
            return Vec::new();
        }

        let mut names = Vec::new();
        for path in markdown_files(&self.post_dir) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                tracing::debug!("Found post: {:?}", path);
                names.push(stem.to_string());
            }
        }
        names
    }

    /// Load a single post by name, `None` if no such file exists
    pub fn load_post(&self, name: &str) -> Result<Option<Post>> {
        if !is_safe_name(name) {
            tracing::debug!("Rejected post name {:?}", name);
            return Ok(None);
        }

        let path = self.post_dir.join(format!("{}.md", name));
        if !path.is_file() {
            return Ok(None);
        }

        read_post(&path).map(Some)
    }

    /// Load every post, newest first. Posts that fail to load are skipped.
    pub fn load_posts(&self) -> Vec<Post> {
        let mut posts = Vec::new();
        for name in self.list_posts() {
            match self.load_post(&name) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {}
                Err(e) => tracing::warn!("Failed to load post {:?}: {:#}", name, e),
            }
        }

        posts.sort_by_key(|p| Reverse(sort_date(p)));
        posts
    }
}

/// Read and split one markdown file
pub fn read_post(path: &Path) -> Result<Post> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let (metadata, body) =
        FrontMatter::parse(&raw).with_context(|| format!("Failed to parse {:?}", path))?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();

    Ok(Post::new(name, metadata, body.to_string()))
}

/// Markdown files directly inside `dir`, in directory-listing order
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| {
            let keep = path.is_file() && is_markdown_file(path);
            if !keep {
                tracing::debug!("Ignoring file: {:?}", path);
            }
            keep
        })
        .collect()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// Date used for ordering; undated posts sort last
fn sort_date(post: &Post) -> Option<NaiveDate> {
    let created = post.created_at()?;
    let date_part = created.get(..10).unwrap_or(&created);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_list_posts_only_markdown() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "first.md", "---\ntitle: First\n---\n");
        write(dir.path(), "notes.txt", "not a post");
        fs::create_dir(dir.path().join("drafts")).unwrap();

        let loader = ContentLoader::new(dir.path());
        assert_eq!(loader.list_posts(), vec!["first".to_string()]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let loader = ContentLoader::new(dir.path().join("nope"));
        assert!(loader.list_posts().is_empty());
        assert!(loader.load_posts().is_empty());
    }

    #[test]
    fn test_load_post_absent_and_traversal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "real.md", "body");
        let loader = ContentLoader::new(dir.path());

        assert!(loader.load_post("missing").unwrap().is_none());
        assert!(loader.load_post("../real").unwrap().is_none());
        assert!(loader.load_post("real").unwrap().is_some());
    }

    #[test]
    fn test_load_posts_newest_first_and_skips_broken() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "old.md", "---\ncreated_at: 2023-05-01\n---\nold");
        write(dir.path(), "new.md", "---\ncreated_at: 2024-05-01\n---\nnew");
        write(dir.path(), "undated.md", "no metadata");
        write(dir.path(), "broken.md", "---\ntitle: [oops\n---\n");

        let loader = ContentLoader::new(dir.path());
        let names: Vec<_> = loader.load_posts().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["new", "old", "undated"]);
    }
}
