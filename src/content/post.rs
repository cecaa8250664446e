//! Post model

use super::FrontMatter;

/// A blog post as read from the post directory
#[derive(Debug, Clone)]
pub struct Post {
    /// File stem, used as the route key under `/post/`
    pub name: String,

    /// Front-matter metadata
    pub metadata: FrontMatter,

    /// Raw markdown body
    pub content: String,
}

impl Post {
    pub fn new(name: String, metadata: FrontMatter, content: String) -> Self {
        Self {
            name,
            metadata,
            content,
        }
    }

    /// Title from metadata, falling back to the file name
    pub fn title(&self) -> String {
        self.metadata
            .get_str("title")
            .unwrap_or_else(|| self.name.clone())
    }

    /// Slug from metadata, falling back to the file name
    pub fn slug(&self) -> String {
        self.metadata
            .get_str("slug")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn created_at(&self) -> Option<String> {
        self.metadata.get_str("created_at")
    }

    /// Last modification date: `updated_at` if set, else `created_at`
    pub fn last_modified(&self) -> Option<String> {
        self.metadata
            .get_str("updated_at")
            .or_else(|| self.created_at())
    }
}
