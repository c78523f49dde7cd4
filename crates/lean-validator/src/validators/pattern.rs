//! Pattern-based validators using regular expressions

use super::required_str;
use crate::error::{ValidatorError, ValidatorResult};
use crate::rules::Verdict;
use crate::traits::{FromRuleArgs, Rule};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

const DELIMITERS: [char; 3] = ['/', '#', '~'];

/// Compiled patterns are kept until the cache reaches this size, then dropped
const PATTERN_CACHE_LIMIT: usize = 256;

static PATTERN_CACHE: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();

/// Validator for custom regular expression patterns.
///
/// Matching is a search, so anchor the pattern (`^...$`) to match the whole
/// string. Only string values can match.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
}

impl PatternValidator {
    /// Compile a pattern, accepting both bare and delimited (`/^\d+$/i`) forms
    pub fn new(pattern: &str) -> ValidatorResult<Self> {
        let regex = cached_pattern(pattern).map_err(|e| ValidatorError::invalid_pattern("regex", &e))?;
        Ok(Self { pattern: regex })
    }

    /// Create a validator from an existing Regex
    pub fn from_regex(regex: Regex) -> Self {
        Self { pattern: regex }
    }

    /// Get the pattern string
    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Rule for PatternValidator {
    fn check(&self, value: &Value) -> Verdict {
        value.as_str().is_some_and(|text| self.is_match(text)).into()
    }
}

impl FromRuleArgs for PatternValidator {
    const ARITY: usize = 1;

    fn from_args(args: &[Value]) -> ValidatorResult<Self> {
        Self::new(required_str("regex", args, 0)?)
    }
}

/// Compile `pattern` once and share the result between calls.
///
/// A poisoned lock only bypasses the cache.
fn cached_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let cache = PATTERN_CACHE.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(read) = cache.read() {
        if let Some(regex) = read.get(pattern) {
            return Ok(regex.clone());
        }
    }

    let regex = compile_pattern(pattern)?;
    if let Ok(mut write) = cache.write() {
        if write.len() >= PATTERN_CACHE_LIMIT {
            write.clear();
        }
        write.insert(pattern.to_string(), regex.clone());
    }
    Ok(regex)
}

/// Compile `pattern`, translating a delimited form with trailing flags.
///
/// `u` and `D` are accepted and dropped: patterns always match Unicode text
/// and `$` never matches before a trailing newline.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    match split_delimited(pattern) {
        Some((body, flags)) => {
            let flags: String = flags.chars().filter(|c| !matches!(c, 'u' | 'D')).collect();
            if flags.is_empty() {
                Regex::new(body)
            } else {
                Regex::new(&format!("(?{}){}", flags, body))
            }
        }
        None => Regex::new(pattern),
    }
}

fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let delimiter = pattern.chars().next().filter(|c| DELIMITERS.contains(c))?;
    let end = pattern.rfind(delimiter).filter(|&end| end > 0)?;
    let flags = &pattern[end + 1..];
    if flags.chars().all(|c| matches!(c, 'i' | 'm' | 's' | 'x' | 'u' | 'U' | 'D')) {
        Some((&pattern[1..end], flags))
    } else {
        None
    }
}
