//! Validation error types and handling

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type ValidatorResult<T> = Result<T, ValidatorError>;

/// Fatal conditions that abort the current validation call.
///
/// Field-level failures are never reported through this type; they are
/// collected in [`ValidationErrors`] and validation carries on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidatorError {
    /// A rule reference resolved to nothing
    #[error("Rule [{0}] is not defined.")]
    RuleNotFound(String),

    /// Validated output was requested from an invalid session
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// A built-in rule received an argument of the wrong shape
    #[error("Invalid argument for rule [{rule}]: {reason}")]
    InvalidArgument { rule: String, reason: String },

    /// A pattern argument failed to compile
    #[error("Invalid pattern for rule [{rule}]: {reason}")]
    InvalidPattern { rule: String, reason: String },
}

impl ValidatorError {
    pub fn invalid_argument(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_pattern(rule: impl Into<String>, error: &regex::Error) -> Self {
        Self::InvalidPattern {
            rule: rule.into(),
            reason: error.to_string(),
        }
    }

    /// The collected field errors, when this is a `ValidationFailed`
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Messages collected during validation, keyed by dotted path.
///
/// Paths keep their insertion order, and so do the messages within a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    messages: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self {
            messages: IndexMap::new(),
        }
    }

    /// Append a message under the dotted join of the non-empty segments.
    pub fn add<S: AsRef<str>>(&mut self, message: impl Into<String>, path: &[S]) {
        let key = build_path(path.iter().map(AsRef::as_ref));
        self.messages.entry(key).or_default().push(message.into());
    }

    /// Re-key every entry of `other` under `prefix` and append it here.
    pub fn merge<S: AsRef<str>>(&mut self, other: ValidationErrors, prefix: &[S]) {
        for (path, messages) in other.messages {
            let key = build_path(
                prefix
                    .iter()
                    .map(AsRef::as_ref)
                    .chain(std::iter::once(path.as_str())),
            );
            self.messages.entry(key).or_default().extend(messages);
        }
    }

    /// Check if a path has any messages
    pub fn has(&self, path: &str) -> bool {
        self.messages.contains_key(path)
    }

    /// Messages recorded at a path, in insertion order
    pub fn get(&self, path: &str) -> &[String] {
        self.messages.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message recorded at a path
    pub fn first(&self, path: &str) -> Option<&str> {
        self.messages
            .get(path)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn get_from_form_name(&self, name: &str) -> &[String] {
        self.get(&Self::form_name_to_path(name))
    }

    pub fn first_from_form_name(&self, name: &str) -> Option<&str> {
        self.first(&Self::form_name_to_path(name))
    }

    /// Every message across all paths
    pub fn all(&self) -> Vec<&str> {
        self.messages
            .values()
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect()
    }

    /// First message of every path
    pub fn flatten(&self) -> IndexMap<String, String> {
        self.messages
            .iter()
            .map(|(path, messages)| {
                (path.clone(), messages.first().cloned().unwrap_or_default())
            })
            .collect()
    }

    /// Iterate over `(path, messages)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Check if there are any validation errors
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get the number of paths with errors
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Get total number of messages across all paths
    pub fn total_errors(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// Convert a bracket-style form name (`a[b][c]`) to a dotted path (`a.b.c`)
    pub fn form_name_to_path(name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        let normalized = name.replace('[', ".").replace(']', "");
        build_path(normalized.split('.'))
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.messages
            }
        })
    }
}

fn build_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} path(s):", self.messages.len())?;
            for (path, messages) in &self.messages {
                for message in messages {
                    write!(f, "\n  {}: {}", path, message)?;
                }
            }
            Ok(())
        }
    }
}
