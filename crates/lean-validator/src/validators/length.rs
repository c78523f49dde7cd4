//! String length predicate

use super::optional_usize;
use crate::error::ValidatorResult;
use crate::rules::Verdict;
use crate::traits::{FromRuleArgs, Rule};
use serde_json::Value;

/// Validator for string length constraints, counted in characters
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum length constraint
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum length constraint
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set length range (min and max)
    pub fn range(self, min: usize, max: usize) -> Self {
        self.min(min).max(max)
    }
}

impl Rule for LengthValidator {
    fn check(&self, value: &Value) -> Verdict {
        let Some(text) = value.as_str() else {
            return Verdict::Fail;
        };
        // Unicode-aware length
        let length = text.chars().count();
        let above_min = self.min.map_or(true, |min| length >= min);
        let below_max = self.max.map_or(true, |max| length <= max);
        (above_min && below_max).into()
    }
}

impl FromRuleArgs for LengthValidator {
    const ARITY: usize = 2;

    fn from_args(args: &[Value]) -> ValidatorResult<Self> {
        Ok(Self {
            min: optional_usize("length", args, 0)?,
            max: optional_usize("length", args, 1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_counts_characters() {
        let validator = LengthValidator::new().range(2, 4);
        assert_eq!(validator.check(&json!("ab")), Verdict::Pass);
        assert_eq!(validator.check(&json!("あいうえ")), Verdict::Pass);
        assert_eq!(validator.check(&json!("あいうえお")), Verdict::Fail);
        assert_eq!(validator.check(&json!("a")), Verdict::Fail);
    }

    #[test]
    fn test_length_rejects_non_strings() {
        let validator = LengthValidator::new();
        assert_eq!(validator.check(&json!("")), Verdict::Pass);
        assert_eq!(validator.check(&json!(["a", "b"])), Verdict::Fail);
        assert_eq!(validator.check(&json!(12)), Verdict::Fail);
    }

    #[test]
    fn test_length_from_args() {
        let validator = LengthValidator::from_args(&[json!(1)]).unwrap();
        assert_eq!(validator.min, Some(1));
        assert_eq!(validator.max, None);
        assert!(LengthValidator::from_args(&[json!(-1)]).is_err());
    }
}
