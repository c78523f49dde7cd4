//! Type, membership and equality predicates

use super::{required_arg, required_str};
use crate::error::{ValidatorError, ValidatorResult};
use crate::rules::Verdict;
use crate::traits::{FromRuleArgs, Rule};
use serde_json::Value;

/// Accepts any string, including the empty one
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl Rule for StringValidator {
    fn check(&self, value: &Value) -> Verdict {
        value.is_string().into()
    }
}

impl FromRuleArgs for StringValidator {
    const ARITY: usize = 0;

    fn from_args(_args: &[Value]) -> ValidatorResult<Self> {
        Ok(Self)
    }
}

/// Checks that the value is one of the allowed values.
///
/// Comparison is strict: `1` does not match `"1"` and `1` does not match `1.0`.
#[derive(Debug, Clone)]
pub struct InValidator {
    pub choices: Vec<Value>,
}

impl InValidator {
    pub fn new(choices: Vec<Value>) -> Self {
        Self { choices }
    }
}

impl Rule for InValidator {
    fn check(&self, value: &Value) -> Verdict {
        self.choices.contains(value).into()
    }
}

impl FromRuleArgs for InValidator {
    const ARITY: usize = 1;

    fn from_args(args: &[Value]) -> ValidatorResult<Self> {
        match required_arg("in", args, 0)? {
            Value::Array(choices) => Ok(Self::new(choices.clone())),
            _ => Err(ValidatorError::invalid_argument("in", "choices must be a list")),
        }
    }
}

/// Checks that a string value contains a substring
#[derive(Debug, Clone)]
pub struct ContainsValidator {
    pub needle: String,
}

impl ContainsValidator {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl Rule for ContainsValidator {
    fn check(&self, value: &Value) -> Verdict {
        value
            .as_str()
            .is_some_and(|text| text.contains(self.needle.as_str()))
            .into()
    }
}

impl FromRuleArgs for ContainsValidator {
    const ARITY: usize = 1;

    fn from_args(args: &[Value]) -> ValidatorResult<Self> {
        Ok(Self::new(required_str("contains", args, 0)?))
    }
}

/// Checks strict equality with an expected value
#[derive(Debug, Clone)]
pub struct EqualToValidator {
    pub expected: Value,
}

impl Rule for EqualToValidator {
    fn check(&self, value: &Value) -> Verdict {
        (value == &self.expected).into()
    }
}

impl FromRuleArgs for EqualToValidator {
    const ARITY: usize = 1;

    fn from_args(args: &[Value]) -> ValidatorResult<Self> {
        Ok(Self {
            expected: required_arg("equal_to", args, 0)?.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_validator() {
        assert_eq!(StringValidator.check(&json!("")), Verdict::Pass);
        assert_eq!(StringValidator.check(&json!(123)), Verdict::Fail);
        assert_eq!(StringValidator.check(&Value::Null), Verdict::Fail);
    }

    #[test]
    fn test_in_is_strict() {
        let validator = InValidator::new(vec![json!("a"), json!(1)]);
        assert_eq!(validator.check(&json!("a")), Verdict::Pass);
        assert_eq!(validator.check(&json!(1)), Verdict::Pass);
        assert_eq!(validator.check(&json!("1")), Verdict::Fail);
        assert_eq!(validator.check(&json!(1.0)), Verdict::Fail);

        assert!(InValidator::from_args(&[json!("a")]).is_err());
        assert!(InValidator::from_args(&[]).is_err());
    }

    #[test]
    fn test_contains() {
        let validator = ContainsValidator::new("@");
        assert_eq!(validator.check(&json!("a@b")), Verdict::Pass);
        assert_eq!(validator.check(&json!("ab")), Verdict::Fail);
        assert_eq!(validator.check(&json!(["@"])), Verdict::Fail);
    }

    #[test]
    fn test_equal_to() {
        let validator = EqualToValidator::from_args(&[json!(10)]).unwrap();
        assert_eq!(validator.check(&json!(10)), Verdict::Pass);
        assert_eq!(validator.check(&json!("10")), Verdict::Fail);

        let null = EqualToValidator::from_args(&[Value::Null]).unwrap();
        assert_eq!(null.check(&Value::Null), Verdict::Pass);
    }
}
