//! Front-matter parsing

use indexmap::IndexMap;
use serde_yaml::Value;
use thiserror::Error;

/// Errors raised while splitting or decoding a front-matter block
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front-matter block is not terminated by a closing `---`")]
    Unterminated,

    #[error("invalid YAML front-matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,
}

/// Front-matter metadata of a post, in source key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let trimmed = content.trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((Self::default(), content));
        };

        // The opening delimiter must sit on its own line
        let Some(rest) = strip_line_break(rest.trim_start_matches([' ', '\t'])) else {
            return Ok((Self::default(), content));
        };

        let (yaml, body) = split_closing_delimiter(rest).ok_or(FrontMatterError::Unterminated)?;

        if yaml.trim().is_empty() {
            return Ok((Self::default(), body));
        }

        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(map) => {
                let fields = map
                    .into_iter()
                    .filter_map(|(k, v)| scalar_to_string(&k).map(|k| (k, v)))
                    .collect();
                Ok((Self { fields }, body))
            }
            Value::Null => Ok((Self::default(), body)),
            _ => Err(FrontMatterError::NotAMapping),
        }
    }

    /// Display string of a scalar value. Null and missing keys give `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_to_string)
    }

    /// True when the key exists and its value is not empty, zero, false or null
    pub fn is_present(&self, key: &str) -> bool {
        self.fields.get(key).map(is_truthy).unwrap_or(false)
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Convert to a JSON object for template contexts
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| {
                let json = serde_json::to_value(v).unwrap_or(serde_json::Value::Null);
                (k.clone(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Render a YAML scalar the way it would be written back out
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}

/// Find the first line consisting only of `---` and split around it
fn split_closing_delimiter(s: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in s.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &s[..offset];
            let body = &s[offset + line.len()..];
            return Some((yaml, body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }
    None
}
