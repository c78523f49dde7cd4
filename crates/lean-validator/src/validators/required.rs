//! Presence and element-count checks

use crate::rules::Verdict;
use crate::traits::Rule;
use serde_json::Value;

/// Whether a looked-up value counts as supplied.
///
/// Missing, null and the empty string are absent; everything else,
/// including `0`, `false` and empty lists, is present.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Checks that a list or object holds a number of entries within range
#[derive(Debug, Clone, Default)]
pub struct CountValidator {
    /// Minimum count (inclusive)
    pub min: Option<usize>,
    /// Maximum count (inclusive)
    pub max: Option<usize>,
}

impl CountValidator {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }

    fn count(value: &Value) -> Option<usize> {
        match value {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }
}

impl Rule for CountValidator {
    fn check(&self, value: &Value) -> Verdict {
        let Some(count) = Self::count(value) else {
            return Verdict::Fail;
        };
        let above_min = self.min.map_or(true, |min| count >= min);
        let below_max = self.max.map_or(true, |max| count <= max);
        (above_min && below_max).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&Value::Null)));
        assert!(!is_present(Some(&json!(""))));

        assert!(is_present(Some(&json!(" "))));
        assert!(is_present(Some(&json!(0))));
        assert!(is_present(Some(&json!(false))));
        assert!(is_present(Some(&json!([]))));
        assert!(is_present(Some(&json!({}))));
    }

    #[test]
    fn test_count_validator() {
        let validator = CountValidator::new(Some(1), Some(2));
        assert_eq!(validator.check(&json!(["a"])), Verdict::Pass);
        assert_eq!(validator.check(&json!({"a": 1, "b": 2})), Verdict::Pass);
        assert_eq!(validator.check(&json!([])), Verdict::Fail);
        assert_eq!(validator.check(&json!([1, 2, 3])), Verdict::Fail);
        assert_eq!(validator.check(&json!("abc")), Verdict::Fail);

        let unbounded = CountValidator::default();
        assert_eq!(unbounded.check(&json!([])), Verdict::Pass);
    }
}
