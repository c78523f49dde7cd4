//! Traits for external rule objects

use crate::error::ValidatorResult;
use crate::rules::Verdict;
use serde_json::Value;

/// A rule object checked against a single field value.
///
/// Instances are built per application from the call's arguments by a
/// [`RuleFactory`], so a rule holds its configuration, not session state.
pub trait Rule: Send + Sync {
    fn check(&self, value: &Value) -> Verdict;
}

/// Builds [`Rule`] instances from positional arguments.
pub trait RuleFactory: Send + Sync {
    /// Name used in error messages and logs
    fn name(&self) -> &str;

    /// Number of declared constructor parameters
    fn arity(&self) -> usize;

    fn build(&self, args: &[Value]) -> ValidatorResult<Box<dyn Rule>>;
}

/// Rule types that can be constructed straight from arguments.
///
/// Implementing this is enough to register the type by name with
/// [`RuleTable::register`](crate::rules::RuleTable::register).
pub trait FromRuleArgs: Rule + Sized + 'static {
    const ARITY: usize;

    fn from_args(args: &[Value]) -> ValidatorResult<Self>;
}

pub(crate) struct TypeFactory<R> {
    name: String,
    _rule: std::marker::PhantomData<fn() -> R>,
}

impl<R> TypeFactory<R> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _rule: std::marker::PhantomData,
        }
    }
}

impl<R: FromRuleArgs> RuleFactory for TypeFactory<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> usize {
        R::ARITY
    }

    fn build(&self, args: &[Value]) -> ValidatorResult<Box<dyn Rule>> {
        Ok(Box::new(R::from_args(args)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidatorError;

    struct AtLeast(i64);

    impl Rule for AtLeast {
        fn check(&self, value: &Value) -> Verdict {
            value.as_i64().is_some_and(|n| n >= self.0).into()
        }
    }

    impl FromRuleArgs for AtLeast {
        const ARITY: usize = 1;

        fn from_args(args: &[Value]) -> ValidatorResult<Self> {
            args.first()
                .and_then(Value::as_i64)
                .map(AtLeast)
                .ok_or_else(|| ValidatorError::invalid_argument("at_least", "expected an integer"))
        }
    }

    #[test]
    fn test_type_factory_builds_rule() {
        let factory = TypeFactory::<AtLeast>::new("at_least");
        assert_eq!(factory.name(), "at_least");
        assert_eq!(factory.arity(), 1);

        let rule = factory.build(&[Value::from(50)]).unwrap();
        assert_eq!(rule.check(&Value::from(100)), Verdict::Pass);
        assert_eq!(rule.check(&Value::from(10)), Verdict::Fail);

        assert!(factory.build(&[Value::from("x")]).is_err());
    }
}
