//! SEO front-matter linter
//!
//! Checks the metadata of every post against fixed SEO thresholds. Errors
//! fail the run, warnings are advisory. A file that cannot be read or parsed
//! gets a single `FILE READ ERROR` and the scan moves on.

mod config;
pub mod report;
mod rules;

use anyhow::{bail, Context, Result};
use std::path::Path;
use walkdir::WalkDir;

pub use config::{CriticalLimits, LintConfig, WarningLimits};
pub use rules::{Bound, Finding, LengthRule, Measure, PatternRule, Rule, RuleSet, Severity, Tier};

use crate::content::loader::read_post;
use crate::content::FrontMatter;

/// Findings for a single file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub file_name: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FileReport {
    pub fn new(file_name: impl Into<String>, findings: Vec<Finding>) -> Self {
        let mut report = Self {
            file_name: file_name.into(),
            ..Default::default()
        };
        for finding in findings {
            match finding.severity {
                Severity::Error => report.errors.push(finding.message),
                Severity::Warning => report.warnings.push(finding.message),
            }
        }
        report
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Findings for a whole directory, in scan order
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    pub files: Vec<FileReport>,
}

impl LintReport {
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileReport::has_errors)
    }

    pub fn passed(&self) -> bool {
        !self.has_errors()
    }

    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.warnings.len()).sum()
    }
}

pub struct Linter {
    rules: RuleSet,
}

impl Linter {
    pub fn new(config: &LintConfig) -> Result<Self> {
        let rules = RuleSet::from_config(config)
            .with_context(|| format!("Invalid slug pattern {:?}", config.slug_pattern))?;
        Ok(Self { rules })
    }

    /// Check one metadata mapping
    pub fn lint_metadata(&self, meta: &FrontMatter) -> Vec<Finding> {
        self.rules.evaluate(meta)
    }

    /// Check one file; read and parse failures become a single error
    pub fn lint_file(&self, path: &Path) -> FileReport {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!("Linting {:?}", path);
        let findings = match read_post(path) {
            Ok(post) => self.lint_metadata(&post.metadata),
            Err(e) => {
                tracing::debug!("Could not read {:?}: {:#}", path, e);
                vec![Finding::error(format!("FILE READ ERROR: {}", root_cause(&e)))]
            }
        };

        FileReport::new(file_name, findings)
    }

    /// Check every markdown file directly inside `dir`
    pub fn lint_dir(&self, dir: &Path) -> Result<LintReport> {
        if !dir.is_dir() {
            bail!("Post directory not found: {:?}", dir);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            match entry {
                Ok(entry) if is_lint_target(entry.path()) => {
                    files.push(self.lint_file(entry.path()))
                }
                Ok(entry) => tracing::debug!("Ignoring {:?}", entry.path()),
                Err(e) => match e.path().filter(|p| is_lint_target(p)) {
                    Some(path) => files.push(unreadable(path, &e)),
                    None => tracing::warn!("Skipping unreadable entry: {}", e),
                },
            }
        }

        let report = LintReport { files };
        tracing::info!(
            "Linted {} files: {} errors, {} warnings",
            report.files.len(),
            report.error_count(),
            report.warning_count()
        );
        Ok(report)
    }
}

/// The innermost cause carries the useful text (IO or YAML error)
fn root_cause(e: &anyhow::Error) -> String {
    e.root_cause().to_string()
}

/// Any entry whose name ends in `.md`, whatever its type. Directories and
/// broken links fail on read and get reported.
fn is_lint_target(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(".md"))
        .unwrap_or(false)
}

/// Report for an entry the directory walk could not even inspect
fn unreadable(path: &Path, e: &walkdir::Error) -> FileReport {
    let cause = e
        .io_error()
        .map(ToString::to_string)
        .unwrap_or_else(|| e.to_string());
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileReport::new(file_name, vec![Finding::error(format!("FILE READ ERROR: {}", cause))])
}
