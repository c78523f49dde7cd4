//! String clean-up pass run over input before validation.
//!
//! Every string leaf gets the rules configured for its dotted path (array
//! elements are addressed by index), or the global defaults when nothing is
//! configured. A `*` path segment matches any one segment.
//!
//! ```
//! use lean_validator::Sanitizer;
//! use serde_json::json;
//!
//! let sanitizer = Sanitizer::new().skip(["password"]).to_digits(["items.*.code"]);
//! let cleaned = sanitizer.clean_value(json!({
//!     "name": "  John  ",
//!     "password": "  secret  ",
//!     "items": [{ "code": "A-123" }],
//! }));
//! assert_eq!(cleaned, json!({
//!     "name": "John",
//!     "password": "  secret  ",
//!     "items": [{ "code": "123" }],
//! }));
//! ```

use crate::error::{ValidatorError, ValidatorResult};
use crate::kana;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

pub type SanitizeFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

const TRIM: &str = "trim";

#[derive(Clone)]
pub struct Sanitizer {
    rules: HashMap<String, SanitizeFn>,
    /// Rule names per path, in registration order
    schema: IndexMap<String, Vec<String>>,
    defaults: Vec<String>,
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rules: Vec<_> = self.rules.keys().collect();
        rules.sort();
        f.debug_struct("Sanitizer")
            .field("rules", &rules)
            .field("schema", &self.schema)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Stock rules, trimming every string by default
    pub fn new() -> Self {
        let mut rules: HashMap<String, SanitizeFn> = HashMap::new();
        rules.insert(TRIM.to_string(), Arc::new(|s: &str| s.trim().to_string()));
        rules.insert(
            "digits".to_string(),
            Arc::new(|s: &str| s.chars().filter(char::is_ascii_digit).collect()),
        );
        rules.insert("lower".to_string(), Arc::new(|s: &str| s.to_lowercase()));
        rules.insert("upper".to_string(), Arc::new(|s: &str| s.to_uppercase()));
        rules.insert(
            "kana".to_string(),
            Arc::new(|s: &str| kana::to_half_ascii(&kana::to_full_katakana(s))),
        );
        rules.insert(
            "hankaku".to_string(),
            Arc::new(|s: &str| kana::to_half_space(&kana::to_half_ascii(&kana::to_half_katakana(s)))),
        );
        rules.insert(
            "zenkaku".to_string(),
            Arc::new(|s: &str| kana::to_full_space(&kana::to_full_ascii(&kana::to_full_katakana(s)))),
        );

        Self {
            rules,
            schema: IndexMap::new(),
            defaults: vec![TRIM.to_string()],
        }
    }

    /// Leave these paths untouched
    pub fn skip<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            self.schema.insert(field.into(), Vec::new());
        }
        self
    }

    /// Run the defaults on these paths, except `trim`
    pub fn skip_trim<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules: Vec<String> = self.defaults.iter().filter(|r| *r != TRIM).cloned().collect();
        for field in fields {
            self.schema.insert(field.into(), rules.clone());
        }
        self
    }

    /// Add `rule` after the rules already configured for each path
    pub fn apply<I, S>(self, rule: &str, fields: I) -> ValidatorResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.rules.contains_key(rule) {
            return Err(ValidatorError::RuleNotFound(rule.to_string()));
        }
        Ok(self.push_rule(rule, fields))
    }

    fn push_rule<I, S>(mut self, rule: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let defaults = &self.defaults;
            let rules = self
                .schema
                .entry(field.into())
                .or_insert_with(|| defaults.clone());
            if !rules.iter().any(|r| r == rule) {
                rules.push(rule.to_string());
            }
        }
        self
    }

    pub fn to_trim<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.push_rule(TRIM, fields)
    }

    /// Keep ASCII digits only
    pub fn to_digits<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.push_rule("digits", fields)
    }

    pub fn to_lower<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.push_rule("lower", fields)
    }

    pub fn to_upper<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.push_rule("upper", fields)
    }

    /// Half-width katakana to full-width; full-width letters and digits to ASCII
    pub fn to_kana<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.push_rule("kana", fields)
    }

    /// Katakana, letters, digits and spaces to half-width
    pub fn to_hankaku<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.push_rule("hankaku", fields)
    }

    /// Katakana, letters, digits and spaces to full-width
    pub fn to_zenkaku<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.push_rule("zenkaku", fields)
    }

    /// Register or replace a rule usable with [`apply`](Self::apply)
    pub fn add_rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
        self
    }

    pub fn clean(&self, data: Map<String, Value>) -> Map<String, Value> {
        self.clean_map(data, "")
    }

    /// Clean any value; a bare string is cleaned with the defaults
    pub fn clean_value(&self, value: Value) -> Value {
        self.clean_at(value, "")
    }

    fn clean_map(&self, data: Map<String, Value>, prefix: &str) -> Map<String, Value> {
        data.into_iter()
            .map(|(key, value)| {
                let path = join_path(prefix, &key);
                let value = self.clean_at(value, &path);
                (key, value)
            })
            .collect()
    }

    fn clean_at(&self, value: Value, path: &str) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.clean_map(map, path)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| self.clean_at(item, &join_path(path, &index.to_string())))
                    .collect(),
            ),
            Value::String(text) => Value::String(self.clean_str(text, path)),
            other => other,
        }
    }

    fn clean_str(&self, text: String, path: &str) -> String {
        let names = self.rules_for(path);
        trace!(path, rules = ?names, "sanitizing");
        names
            .iter()
            .filter_map(|name| self.rules.get(name))
            .fold(text, |text, rule| rule(&text))
    }

    fn rules_for(&self, path: &str) -> &[String] {
        if let Some(rules) = self.schema.get(path) {
            return rules;
        }
        self.schema
            .iter()
            .find(|(pattern, _)| pattern.contains('*') && wildcard_match(pattern, path))
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(self.defaults.as_slice())
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn wildcard_match(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('.');
    let mut path_segments = path.split('.');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some("*"), Some(segment)) if !segment.is_empty() => continue,
            (Some(expected), Some(segment)) if expected == segment => continue,
            _ => return false,
        }
    }
}
