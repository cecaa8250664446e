//! List posts

use anyhow::Result;
use std::io::Write;

use crate::content::ContentLoader;
use crate::Blog;

/// Print every post as `<created_at> - <title> [<slug>]`, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let stdout = std::io::stdout();
    write_posts(blog, &mut stdout.lock())
}

pub fn write_posts<W: Write>(blog: &Blog, out: &mut W) -> Result<()> {
    let posts = ContentLoader::new(&blog.post_dir).load_posts();

    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        writeln!(
            out,
            "  {} - {} [{}]",
            post.created_at().unwrap_or_else(|| "----------".to_string()),
            post.title(),
            post.slug()
        )?;
    }

    Ok(())
}
