//! Linter thresholds

use serde::{Deserialize, Serialize};

/// Bounds whose violation blocks a commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CriticalLimits {
    pub title_max: usize,
    pub title_min: usize,
    pub desc_max: usize,
    pub desc_min: usize,
    pub slug_max: usize,
}

impl Default for CriticalLimits {
    fn default() -> Self {
        Self {
            title_max: 70,
            title_min: 10,
            desc_max: 300,
            desc_min: 10,
            slug_max: 100,
        }
    }
}

/// Advisory bounds, only checked when the critical bound holds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WarningLimits {
    pub title_optimal_max: usize,
    pub desc_optimal_max: usize,
    pub desc_optimal_min: usize,
    pub slug_optimal_max: usize,
}

impl Default for WarningLimits {
    fn default() -> Self {
        Self {
            title_optimal_max: 60,
            desc_optimal_max: 160,
            desc_optimal_min: 50,
            slug_optimal_max: 75,
        }
    }
}

/// Linter configuration (`lint:` section of _config.yml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LintConfig {
    pub required_keys: Vec<String>,
    pub critical: CriticalLimits,
    pub warning: WarningLimits,
    pub slug_pattern: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            required_keys: [
                "title",
                "description",
                "image",
                "slug",
                "author",
                "created_at",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            critical: CriticalLimits::default(),
            warning: WarningLimits::default(),
            slug_pattern: "^[a-z0-9-]+$".to_string(),
        }
    }
}
