//! End-to-end checks of the SEO linter over real directories

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use yarb::commands::lint::run_with_output;
use yarb::config::SiteConfig;
use yarb::lint::report::Palette;
use yarb::Blog;

const VALID_POST: &str = r#"---
title: Writing a static blog in Rust
description: A walk through rendering markdown posts with front-matter into HTML pages.
image: covers/rust-blog.png
slug: writing-a-static-blog-in-rust
author: Jane Doe
created_at: 2024-04-01
---

# Hello
"#;

const EMPTY_POST: &str = "---\nnotes: nothing useful here\n---\nBody only.\n";

fn setup(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let post_dir = dir.path().join("post");
    fs::create_dir(&post_dir).unwrap();
    for (name, content) in files {
        fs::write(post_dir.join(name), content).unwrap();
    }
    dir
}

fn lint(dir: &Path) -> (bool, String) {
    let blog = Blog::with_config(dir, SiteConfig::default());
    let mut out = Vec::new();
    let passed = run_with_output(&blog, None, &Palette::PLAIN, &mut out).unwrap();
    (passed, String::from_utf8(out).unwrap())
}

#[test]
fn test_valid_and_invalid_file() {
    let dir = setup(&[("good.md", VALID_POST), ("bad.md", EMPTY_POST)]);
    let (passed, out) = lint(dir.path());

    assert!(!passed);
    assert!(out.contains("📄 bad.md"));
    assert!(!out.contains("good.md"));
    for key in ["title", "description", "image", "slug", "author", "created_at"] {
        assert!(out.contains(&format!("❌ MISSING KEY: '{}' is required.", key)));
    }
    assert!(out.contains("⛔ SEO CHECK FAILED. COMMIT REJECTED."));
}

#[test]
fn test_empty_directory_passes_with_banners_only() {
    let dir = setup(&[]);
    let (passed, out) = lint(dir.path());

    assert!(passed);
    assert_eq!(
        out,
        "🔍 STARTING SEO PRE-FLIGHT CHECK...\n\
         ------------------------------\n\
         ✅ SEO CHECK PASSED. Code is compliant.\n"
    );
}

#[test]
fn test_warnings_alone_pass() {
    let long_slug = "a".repeat(80);
    let post = VALID_POST.replace("writing-a-static-blog-in-rust", &long_slug);
    let dir = setup(&[("long.md", &post)]);
    let (passed, out) = lint(dir.path());

    assert!(passed);
    assert!(out.contains("⚠️  Slug long: 80 chars. Consider shortening."));
    assert!(out.contains("✅ SEO CHECK PASSED."));
}

#[test]
fn test_unreadable_file_does_not_stop_the_scan() {
    let dir = setup(&[
        ("broken.md", "---\ntitle: [never closed\n---\n"),
        ("bad.md", EMPTY_POST),
        ("good.md", VALID_POST),
    ]);
    let (passed, out) = lint(dir.path());

    assert!(!passed);
    assert!(out.contains("📄 broken.md\n   ❌ FILE READ ERROR: "));
    assert!(out.contains("📄 bad.md"));
}

#[test]
fn test_non_markdown_files_are_ignored() {
    let dir = setup(&[("README.txt", "not a post"), ("good.md", VALID_POST)]);
    let (passed, out) = lint(dir.path());

    assert!(passed);
    assert!(!out.contains("README"));
}

#[test]
fn test_directory_named_like_a_post_fails_the_run() {
    let dir = setup(&[("good.md", VALID_POST)]);
    fs::create_dir(dir.path().join("post/folder.md")).unwrap();
    let (passed, out) = lint(dir.path());

    assert!(!passed);
    assert!(out.contains("📄 folder.md"));
    assert!(out.contains("FILE READ ERROR: "));
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_fails_the_run() {
    let dir = setup(&[("good.md", VALID_POST)]);
    let post_dir = dir.path().join("post");
    std::os::unix::fs::symlink(post_dir.join("gone.md"), post_dir.join("dangling.md")).unwrap();
    let (passed, out) = lint(dir.path());

    assert!(!passed);
    assert!(out.contains("📄 dangling.md"));
    assert!(out.contains("FILE READ ERROR: "));
    assert!(!out.contains("📄 good.md"));
}

#[test]
fn test_seo_lint_binary_exit_codes() {
    let dir = setup(&[("good.md", VALID_POST)]);
    let status = Command::new(env!("CARGO_BIN_EXE_seo-lint"))
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(0));

    fs::write(dir.path().join("post/bad.md"), EMPTY_POST).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_seo-lint"))
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MISSING KEY"));
}
