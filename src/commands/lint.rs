//! Run the SEO linter and print its report

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::lint::report::{write_report, Palette};
use crate::lint::Linter;
use crate::Blog;

/// Lint `dir` (or the configured post directory) and print the report to
/// stdout. Returns whether the check passed.
pub fn run(blog: &Blog, dir: Option<&Path>, no_color: bool) -> Result<bool> {
    let stdout = std::io::stdout();
    let palette = Palette::detect(no_color);
    run_with_output(blog, dir, &palette, &mut stdout.lock())
}

pub fn run_with_output<W: Write>(
    blog: &Blog,
    dir: Option<&Path>,
    palette: &Palette,
    out: &mut W,
) -> Result<bool> {
    let dir = dir.unwrap_or(blog.post_dir.as_path());
    let report = Linter::new(&blog.config.lint)?.lint_dir(dir)?;

    write_report(out, &report, palette)?;
    out.flush()?;

    Ok(report.passed())
}
