//! SEO rule table
//!
//! Rules run in a fixed order and every rule runs. A length rule is an
//! ordered list of tiers: the first tier whose bound is violated produces the
//! rule's only finding, so a critical tier shadows the warning tier below it.

use regex::Regex;

use super::LintConfig;
use crate::content::FrontMatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// A length limit, exclusive on both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Violated when the length is greater than the limit
    Above(usize),
    /// Violated when the length is less than the limit
    Below(usize),
}

impl Bound {
    fn is_violated_by(self, len: usize) -> bool {
        match self {
            Bound::Above(limit) => len > limit,
            Bound::Below(limit) => len < limit,
        }
    }

    fn limit(self) -> usize {
        match self {
            Bound::Above(limit) | Bound::Below(limit) => limit,
        }
    }
}

/// What a message template gets to see
pub struct Measure<'a> {
    pub value: &'a str,
    pub len: usize,
    pub limit: usize,
}

type Describe = fn(&Measure<'_>) -> String;

pub struct Tier {
    pub bound: Bound,
    pub severity: Severity,
    describe: Describe,
}

impl Tier {
    fn new(bound: Bound, severity: Severity, describe: Describe) -> Self {
        Self {
            bound,
            severity,
            describe,
        }
    }
}

pub struct LengthRule {
    pub field: &'static str,
    pub tiers: Vec<Tier>,
}

impl LengthRule {
    fn evaluate(&self, value: &str) -> Option<Finding> {
        let len = value.chars().count();
        self.tiers
            .iter()
            .find(|tier| tier.bound.is_violated_by(len))
            .map(|tier| Finding {
                severity: tier.severity,
                message: (tier.describe)(&Measure {
                    value,
                    len,
                    limit: tier.bound.limit(),
                }),
            })
    }
}

pub struct PatternRule {
    pub field: &'static str,
    pub pattern: Regex,
    describe: Describe,
}

pub enum Rule {
    /// Every listed key must be present and non-empty
    Required(Vec<String>),
    Length(LengthRule),
    Pattern(PatternRule),
}

impl Rule {
    fn evaluate(&self, meta: &FrontMatter, findings: &mut Vec<Finding>) {
        match self {
            Rule::Required(keys) => {
                for key in keys.iter().filter(|key| !meta.is_present(key)) {
                    findings.push(Finding::error(format!(
                        "MISSING KEY: '{}' is required.",
                        key
                    )));
                }
            }
            Rule::Length(rule) => {
                let value = field_value(meta, rule.field);
                findings.extend(rule.evaluate(&value));
            }
            Rule::Pattern(rule) => {
                let value = field_value(meta, rule.field);
                if !rule.pattern.is_match(&value) {
                    let measure = Measure {
                        value: &value,
                        len: value.chars().count(),
                        limit: 0,
                    };
                    findings.push(Finding::error((rule.describe)(&measure)));
                }
            }
        }
    }
}

/// Missing and null values are checked as the empty string
fn field_value(meta: &FrontMatter, field: &str) -> String {
    meta.get_str(field).unwrap_or_default()
}

/// The ordered rule list built from a config
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn from_config(config: &LintConfig) -> Result<Self, regex::Error> {
        let critical = &config.critical;
        let warning = &config.warning;

        let rules = vec![
            Rule::Required(config.required_keys.clone()),
            Rule::Length(LengthRule {
                field: "title",
                tiers: vec![
                    Tier::new(Bound::Above(critical.title_max), Severity::Error, |m| {
                        format!("TITLE CRITICAL: {} chars (Max allowed: {}).", m.len, m.limit)
                    }),
                    Tier::new(
                        Bound::Above(warning.title_optimal_max),
                        Severity::Warning,
                        |m| {
                            format!(
                                "Title truncated: {} chars (Google cuts off at ~{}).",
                                m.len, m.limit
                            )
                        },
                    ),
                ],
            }),
            Rule::Length(LengthRule {
                field: "title",
                tiers: vec![Tier::new(
                    Bound::Below(critical.title_min),
                    Severity::Error,
                    |m| format!("TITLE CRITICAL: Too short ({} chars).", m.len),
                )],
            }),
            Rule::Length(LengthRule {
                field: "description",
                tiers: vec![
                    Tier::new(Bound::Above(critical.desc_max), Severity::Error, |m| {
                        format!("DESC CRITICAL: Spam length detected ({} chars).", m.len)
                    }),
                    Tier::new(
                        Bound::Above(warning.desc_optimal_max),
                        Severity::Warning,
                        |m| format!("Desc truncated: {} chars (Best is < {}).", m.len, m.limit),
                    ),
                ],
            }),
            Rule::Length(LengthRule {
                field: "description",
                tiers: vec![
                    Tier::new(Bound::Below(critical.desc_min), Severity::Error, |_| {
                        "DESC CRITICAL: Empty or near-empty.".to_string()
                    }),
                    Tier::new(
                        Bound::Below(warning.desc_optimal_min),
                        Severity::Warning,
                        |m| {
                            format!(
                                "Desc weak: Only {} chars (Recommended > {}).",
                                m.len, m.limit
                            )
                        },
                    ),
                ],
            }),
            Rule::Pattern(PatternRule {
                field: "slug",
                pattern: Regex::new(&config.slug_pattern)?,
                describe: |m| {
                    format!(
                        "SLUG INVALID: '{}' contains forbidden characters. Use lowercase a-z, 0-9, and hyphens.",
                        m.value
                    )
                },
            }),
            Rule::Length(LengthRule {
                field: "slug",
                tiers: vec![
                    Tier::new(Bound::Above(critical.slug_max), Severity::Error, |m| {
                        format!("SLUG CRITICAL: URL is massively long ({} chars).", m.len)
                    }),
                    Tier::new(
                        Bound::Above(warning.slug_optimal_max),
                        Severity::Warning,
                        |m| format!("Slug long: {} chars. Consider shortening.", m.len),
                    ),
                ],
            }),
        ];

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run every rule against one file's metadata
    pub fn evaluate(&self, meta: &FrontMatter) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in &self.rules {
            rule.evaluate(meta, &mut findings);
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::from_config(&LintConfig::default()).unwrap()
    }

    #[test]
    fn test_length_rule_first_tier_wins() {
        let rule = LengthRule {
            field: "title",
            tiers: vec![
                Tier::new(Bound::Above(5), Severity::Error, |_| "err".into()),
                Tier::new(Bound::Above(2), Severity::Warning, |_| "warn".into()),
            ],
        };
        assert_eq!(rule.evaluate("abcdef"), Some(Finding::error("err")));
        assert_eq!(rule.evaluate("abcd"), Some(Finding::warning("warn")));
        assert_eq!(rule.evaluate("ab"), None);
    }

    #[test]
    fn test_lengths_count_characters() {
        let rule = LengthRule {
            field: "title",
            tiers: vec![Tier::new(Bound::Above(3), Severity::Error, |m| {
                m.len.to_string()
            })],
        };
        assert_eq!(rule.evaluate("ééé"), None);
        assert_eq!(rule.evaluate("éééé"), Some(Finding::error("4")));
    }

    #[test]
    fn test_rule_order() {
        let kinds: Vec<_> = rules()
            .rules()
            .iter()
            .map(|r| match r {
                Rule::Required(_) => "required",
                Rule::Length(l) => l.field,
                Rule::Pattern(p) => p.field,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "required",
                "title",
                "title",
                "description",
                "description",
                "slug",
                "slug"
            ]
        );
    }

    #[test]
    fn test_bad_slug_pattern_is_rejected() {
        let config = LintConfig {
            slug_pattern: "[unclosed".to_string(),
            ..Default::default()
        };
        assert!(RuleSet::from_config(&config).is_err());
    }

    #[test]
    fn test_empty_metadata_findings() {
        let findings = rules().evaluate(&FrontMatter::default());
        let errors: Vec<_> = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .map(|f| f.message.as_str())
            .collect();
        assert_eq!(
            errors,
            vec![
                "MISSING KEY: 'title' is required.",
                "MISSING KEY: 'description' is required.",
                "MISSING KEY: 'image' is required.",
                "MISSING KEY: 'slug' is required.",
                "MISSING KEY: 'author' is required.",
                "MISSING KEY: 'created_at' is required.",
                "TITLE CRITICAL: Too short (0 chars).",
                "DESC CRITICAL: Empty or near-empty.",
                "SLUG INVALID: '' contains forbidden characters. Use lowercase a-z, 0-9, and hyphens.",
            ]
        );
        assert!(findings.iter().all(|f| f.severity == Severity::Error));
    }
}
