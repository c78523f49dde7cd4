//! Built-in predicates and the rule sets shipped with the crate

pub mod custom;
pub mod email;
pub mod filter;
pub mod ja;
pub mod length;
pub mod net;
pub mod numeric;
pub mod pattern;
pub mod required;

pub use custom::{ContainsValidator, EqualToValidator, InValidator, StringValidator};
pub use filter::{Filter, FilterValidator};
pub use length::LengthValidator;
pub use numeric::IntValidator;
pub use pattern::PatternValidator;
pub use required::CountValidator;

use crate::error::{ValidatorError, ValidatorResult};
use crate::rules::Verdict;
use crate::traits::{FromRuleArgs, Rule};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The closed set of predicates every session can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    String,
    Int,
    FilterVar,
    Regex,
    In,
    Contains,
    EqualTo,
    Length,
}

impl Builtin {
    pub const ALL: [Builtin; 8] = [
        Builtin::String,
        Builtin::Int,
        Builtin::FilterVar,
        Builtin::Regex,
        Builtin::In,
        Builtin::Contains,
        Builtin::EqualTo,
        Builtin::Length,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::String => "string",
            Builtin::Int => "int",
            Builtin::FilterVar => "filter_var",
            Builtin::Regex => "regex",
            Builtin::In => "in",
            Builtin::Contains => "contains",
            Builtin::EqualTo => "equal_to",
            Builtin::Length => "length",
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        match self {
            Builtin::String => StringValidator::ARITY,
            Builtin::Int => IntValidator::ARITY,
            Builtin::FilterVar => FilterValidator::ARITY,
            Builtin::Regex => PatternValidator::ARITY,
            Builtin::In => InValidator::ARITY,
            Builtin::Contains => ContainsValidator::ARITY,
            Builtin::EqualTo => EqualToValidator::ARITY,
            Builtin::Length => LengthValidator::ARITY,
        }
    }

    /// Build the predicate from `args` and check `value` against it
    pub fn call(&self, value: &Value, args: &[Value]) -> ValidatorResult<Verdict> {
        let verdict = match self {
            Builtin::String => StringValidator::from_args(args)?.check(value),
            Builtin::Int => IntValidator::from_args(args)?.check(value),
            Builtin::FilterVar => FilterValidator::from_args(args)?.check(value),
            Builtin::Regex => PatternValidator::from_args(args)?.check(value),
            Builtin::In => InValidator::from_args(args)?.check(value),
            Builtin::Contains => ContainsValidator::from_args(args)?.check(value),
            Builtin::EqualTo => EqualToValidator::from_args(args)?.check(value),
            Builtin::Length => LengthValidator::from_args(args)?.check(value),
        };
        Ok(verdict)
    }
}

impl FromStr for Builtin {
    type Err = ValidatorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Builtin::ALL
            .into_iter()
            .find(|builtin| builtin.name() == name)
            .ok_or_else(|| ValidatorError::RuleNotFound(name.to_string()))
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional integer bound at `index`; missing and null both mean "no bound"
pub(crate) fn optional_i64(rule: &str, args: &[Value], index: usize) -> ValidatorResult<Option<i64>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            ValidatorError::invalid_argument(rule, format!("argument {} must be an integer", index + 1))
        }),
    }
}

pub(crate) fn optional_usize(rule: &str, args: &[Value], index: usize) -> ValidatorResult<Option<usize>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                ValidatorError::invalid_argument(
                    rule,
                    format!("argument {} must be a non-negative integer", index + 1),
                )
            }),
    }
}

pub(crate) fn required_arg<'a>(rule: &str, args: &'a [Value], index: usize) -> ValidatorResult<&'a Value> {
    args.get(index).ok_or_else(|| {
        ValidatorError::invalid_argument(rule, format!("missing argument {}", index + 1))
    })
}

pub(crate) fn required_str<'a>(rule: &str, args: &'a [Value], index: usize) -> ValidatorResult<&'a str> {
    required_arg(rule, args, index)?.as_str().ok_or_else(|| {
        ValidatorError::invalid_argument(rule, format!("argument {} must be a string", index + 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(builtin.name().parse::<Builtin>(), Ok(builtin));
        }
        assert_eq!(
            "email".parse::<Builtin>(),
            Err(ValidatorError::RuleNotFound("email".to_string()))
        );
    }

    #[test]
    fn test_builtin_arity() {
        assert_eq!(Builtin::String.arity(), 0);
        assert_eq!(Builtin::Int.arity(), 2);
        assert_eq!(Builtin::Regex.arity(), 1);
        assert_eq!(Builtin::Length.arity(), 2);
    }

    #[test]
    fn test_builtin_call() {
        assert_eq!(Builtin::String.call(&json!("a"), &[]), Ok(Verdict::Pass));
        assert_eq!(Builtin::Int.call(&json!(10), &[json!(18), json!(99)]), Ok(Verdict::Fail));
        assert_eq!(Builtin::Int.call(&json!(20), &[json!(18)]), Ok(Verdict::Pass));
        assert_eq!(
            Builtin::In.call(&json!("b"), &[json!(["a", "b"])]),
            Ok(Verdict::Pass)
        );
    }

    #[test]
    fn test_argument_helpers() {
        let args = [json!(3), Value::Null, json!("x")];
        assert_eq!(optional_i64("int", &args, 0), Ok(Some(3)));
        assert_eq!(optional_i64("int", &args, 1), Ok(None));
        assert_eq!(optional_i64("int", &args, 5), Ok(None));
        assert!(optional_i64("int", &args, 2).is_err());
        assert!(optional_usize("length", &[json!(-1)], 0).is_err());
        assert_eq!(required_str("regex", &args, 2), Ok("x"));
        assert!(required_str("regex", &args, 0).is_err());
        assert!(required_arg("regex", &args, 3).is_err());
    }
}
