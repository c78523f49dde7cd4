//! Integer range predicate

use super::optional_i64;
use crate::error::ValidatorResult;
use crate::rules::Verdict;
use crate::traits::{FromRuleArgs, Rule};
use serde_json::Value;

/// Accepts integer numbers within optional inclusive bounds.
///
/// Floats and numeric strings are rejected; `"10"` is not an integer here.
#[derive(Debug, Clone, Default)]
pub struct IntValidator {
    /// Minimum value (inclusive)
    pub min: Option<i64>,
    /// Maximum value (inclusive)
    pub max: Option<i64>,
}

impl IntValidator {
    /// Create a new integer validator with no bounds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set value range (min and max)
    pub fn range(self, min: i64, max: i64) -> Self {
        self.min(min).max(max)
    }

    /// Integer value of a JSON number, widened so `u64` values compare too
    fn integer(value: &Value) -> Option<i128> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from)),
            _ => None,
        }
    }
}

impl Rule for IntValidator {
    fn check(&self, value: &Value) -> Verdict {
        let Some(n) = Self::integer(value) else {
            return Verdict::Fail;
        };
        if self.min.is_some_and(|min| n < i128::from(min)) {
            return Verdict::Fail;
        }
        if self.max.is_some_and(|max| n > i128::from(max)) {
            return Verdict::Fail;
        }
        Verdict::Pass
    }
}

impl FromRuleArgs for IntValidator {
    const ARITY: usize = 2;

    fn from_args(args: &[Value]) -> ValidatorResult<Self> {
        Ok(Self {
            min: optional_i64("int", args, 0)?,
            max: optional_i64("int", args, 1)?,
        })
    }
}

/// Whether `s` parses as a finite float, allowing surrounding whitespace
pub fn is_float_str(s: &str) -> bool {
    s.trim()
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

/// Whether `s` is a decimal integer literal with an optional sign
pub fn is_int_str(s: &str) -> bool {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && trimmed.parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_only_accepts_integers() {
        let validator = IntValidator::new();
        assert_eq!(validator.check(&json!(42)), Verdict::Pass);
        assert_eq!(validator.check(&json!(-7)), Verdict::Pass);
        assert_eq!(validator.check(&json!(u64::MAX)), Verdict::Pass);

        assert_eq!(validator.check(&json!(1.5)), Verdict::Fail);
        assert_eq!(validator.check(&json!("10")), Verdict::Fail);
        assert_eq!(validator.check(&Value::Null), Verdict::Fail);
        assert_eq!(validator.check(&json!(true)), Verdict::Fail);
    }

    #[test]
    fn test_int_bounds() {
        let validator = IntValidator::new().range(18, 99);
        assert_eq!(validator.check(&json!(18)), Verdict::Pass);
        assert_eq!(validator.check(&json!(99)), Verdict::Pass);
        assert_eq!(validator.check(&json!(10)), Verdict::Fail);
        assert_eq!(validator.check(&json!(100)), Verdict::Fail);

        let min_only = IntValidator::new().min(0);
        assert_eq!(min_only.check(&json!(-1)), Verdict::Fail);
        assert_eq!(min_only.check(&json!(1_000_000)), Verdict::Pass);
    }

    #[test]
    fn test_int_from_args() {
        let validator = IntValidator::from_args(&[Value::Null, json!(5)]).unwrap();
        assert_eq!(validator.min, None);
        assert_eq!(validator.max, Some(5));
        assert!(IntValidator::from_args(&[json!("five")]).is_err());
    }

    #[test]
    fn test_numeric_strings() {
        assert!(is_float_str("1.23"));
        assert!(is_float_str("-4"));
        assert!(is_float_str(" 1e3 "));
        assert!(!is_float_str("abc"));
        assert!(!is_float_str(""));
        assert!(!is_float_str("inf"));

        assert!(is_int_str("42"));
        assert!(is_int_str("-3"));
        assert!(is_int_str("0"));
        assert!(!is_int_str("007"));
        assert!(!is_int_str("4.2"));
        assert!(!is_int_str("99999999999999999999"));
    }
}
