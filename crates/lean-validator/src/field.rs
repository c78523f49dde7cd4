//! Fluent rule chain bound to one field of a session

use crate::error::ValidatorResult;
use crate::resolver::{self, Dispatch};
use crate::rules::{ChainFn, RuleRef, Verdict};
use crate::traits::Rule;
use crate::validator::Validator;
use crate::validators::{
    ContainsValidator, CountValidator, EqualToValidator, Filter, FilterValidator, InValidator,
    IntValidator, LengthValidator, PatternValidator, StringValidator,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// What a conditional `required_*` does besides requiring.
///
/// The message replaces the required message when the condition holds. When
/// it does not, an `otherwise` value (null included) is written to the
/// output and the field is skipped; without one the field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Requirement {
    message: Option<String>,
    otherwise: Option<Value>,
}

impl Requirement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn otherwise(mut self, value: impl Into<Value>) -> Self {
        self.otherwise = Some(value.into());
        self
    }
}

impl From<&str> for Requirement {
    fn from(message: &str) -> Self {
        Requirement::new().message(message)
    }
}

impl From<String> for Requirement {
    fn from(message: String) -> Self {
        Requirement::new().message(message)
    }
}

/// Rules applied to the field selected by [`Validator::field`].
///
/// Each method consumes and returns the chain. Once the field has failed or
/// been skipped, every further rule is a no-op. Methods whose arguments can
/// be malformed at runtime return [`ValidatorResult`].
pub struct FieldRules<'v> {
    pub(crate) v: &'v mut Validator,
}

impl<'v> FieldRules<'v> {
    pub(crate) fn new(v: &'v mut Validator) -> Self {
        Self { v }
    }

    /// The session this chain writes into
    pub fn validator(&self) -> &Validator {
        &*self.v
    }

    pub fn has_value(&self) -> bool {
        self.v.has_value()
    }

    /// Message for every failing rule on this field that has none of its own
    pub fn message(self, message: impl Into<String>) -> Self {
        self.v.set_error_message(message.into());
        self
    }

    /// Record an error for this field directly
    pub fn set_error(self, message: Option<&str>) -> Self {
        self.v.set_error(message);
        self
    }

    // ----- required / optional -----

    pub fn required(self) -> Self {
        self.require(None)
    }

    pub fn required_message(self, message: impl Into<String>) -> Self {
        self.require(Some(message.into()))
    }

    fn require(self, message: Option<String>) -> Self {
        if self.v.is_settled() || self.v.has_value() {
            return self;
        }
        let message = message
            .or_else(|| self.v.error_message().map(str::to_string))
            .unwrap_or_else(|| self.v.config().get_required_message().clone());
        self.v.set_error(Some(&message));
        self
    }

    /// Skip the remaining rules when the field has no value
    pub fn optional(self) -> Self {
        if !self.v.is_settled() && !self.v.has_value() {
            self.v.skip_with(None);
        }
        self
    }

    /// Like [`optional`](Self::optional), writing `default` to the output.
    ///
    /// The input is left untouched.
    pub fn optional_or(self, default: impl Into<Value>) -> Self {
        if !self.v.is_settled() && !self.v.has_value() {
            self.v.skip_with(Some(default.into()));
        }
        self
    }

    /// Required when `key` holds `expect`, or any element of `expect` if it is a list
    pub fn required_if(self, key: &str, expect: impl Into<Value>, requirement: impl Into<Requirement>) -> Self {
        let expect = expect.into();
        self.required_when(move |data| matches_expected(data.get(key), &expect), requirement)
    }

    /// Required unless `key` holds `expect`, or any element of `expect` if it is a list
    pub fn required_unless(self, key: &str, expect: impl Into<Value>, requirement: impl Into<Requirement>) -> Self {
        let expect = expect.into();
        self.required_when(move |data| !matches_expected(data.get(key), &expect), requirement)
    }

    /// Required when `key` exists in the input, even as null
    pub fn required_with(self, key: &str, requirement: impl Into<Requirement>) -> Self {
        self.required_when(|data| data.contains_key(key), requirement)
    }

    /// Required when `key` does not exist in the input
    pub fn required_without(self, key: &str, requirement: impl Into<Requirement>) -> Self {
        self.required_when(|data| !data.contains_key(key), requirement)
    }

    /// Required when `condition` holds over the whole input
    pub fn required_when<F>(self, condition: F, requirement: impl Into<Requirement>) -> Self
    where
        F: FnOnce(&Map<String, Value>) -> bool,
    {
        if self.v.is_settled() {
            return self;
        }
        let requirement = requirement.into();
        if condition(self.v.data()) {
            return self.require(requirement.message);
        }
        match requirement.otherwise {
            Some(value) => {
                self.v.skip_with(Some(value));
                self
            }
            None => self.optional(),
        }
    }

    // ----- built-in shortcuts -----

    pub fn string(self) -> Self {
        self.check(StringValidator)
    }

    /// Integer within optional inclusive bounds: `int(18, 99)`, `int(None, 10)`
    pub fn int(self, min: impl Into<Option<i64>>, max: impl Into<Option<i64>>) -> Self {
        self.check(IntValidator {
            min: min.into(),
            max: max.into(),
        })
    }

    /// String length in characters within optional inclusive bounds
    pub fn length(self, min: impl Into<Option<usize>>, max: impl Into<Option<usize>>) -> Self {
        self.check(LengthValidator {
            min: min.into(),
            max: max.into(),
        })
    }

    pub fn filter_var(self, filter: Filter) -> Self {
        self.check(FilterValidator::new(filter))
    }

    /// One of `choices`, compared strictly
    pub fn one_of<I, T>(self, choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.check(InValidator::new(choices.into_iter().map(Into::into).collect()))
    }

    pub fn contains(self, needle: impl Into<String>) -> Self {
        self.check(ContainsValidator::new(needle))
    }

    pub fn equal_to(self, expected: impl Into<Value>) -> Self {
        self.check(EqualToValidator {
            expected: expected.into(),
        })
    }

    pub fn regex(self, pattern: &str) -> ValidatorResult<Self> {
        let rule = PatternValidator::new(pattern)?;
        Ok(self.check(rule))
    }

    /// List or object with an entry count within optional inclusive bounds
    pub fn array_count(self, min: impl Into<Option<usize>>, max: impl Into<Option<usize>>) -> Self {
        if self.v.is_settled() {
            return self;
        }
        let message = self
            .v
            .error_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.v.config().get_array_count_message().clone());
        let rule = CountValidator::new(min.into(), max.into());
        let value = self.current_value();
        let verdict = rule.check(&value);
        self.conclude(verdict, value, Some(message))
    }

    // ----- table aliases -----

    pub fn email(self) -> ValidatorResult<Self> {
        self.rule("email")
    }

    pub fn float(self) -> ValidatorResult<Self> {
        self.rule("float")
    }

    pub fn url(self) -> ValidatorResult<Self> {
        self.rule("url")
    }

    pub fn alnum(self) -> ValidatorResult<Self> {
        self.rule("alnum")
    }

    pub fn alpha(self) -> ValidatorResult<Self> {
        self.rule("alpha")
    }

    pub fn numeric(self) -> ValidatorResult<Self> {
        self.rule("numeric")
    }

    pub fn alpha_dash(self) -> ValidatorResult<Self> {
        self.rule("alpha_dash")
    }

    /// Apply a named rule without arguments
    pub fn rule(self, name: &str) -> ValidatorResult<Self> {
        self.apply(name, Vec::new())
    }

    // ----- dispatch -----

    /// Apply any rule: a name from the table or the built-ins, a
    /// [`Predicate`](crate::Predicate), a chain, or an external rule factory.
    ///
    /// A rule declaring N parameters that receives N+1 arguments ending in a
    /// string uses that string as its failure message.
    pub fn apply(self, rule: impl Into<RuleRef>, args: Vec<Value>) -> ValidatorResult<Self> {
        if self.v.is_settled() {
            return Ok(self);
        }
        let rule = rule.into();
        trace!(field = %self.v.current_key(), rule = %rule.describe(), "applying rule");

        let table = Arc::clone(self.v.rules());
        let resolved = resolver::resolve(&table, rule, args)?;
        let value = self.current_value();
        let verdict = match resolved.dispatch {
            Dispatch::Builtin { builtin, args } => builtin.call(&value, &args)?,
            Dispatch::Predicate { predicate, args } => predicate.call(&value, &args),
            Dispatch::External(rule) => rule.check(&value),
            Dispatch::Chain(chain) => return self.run_chain(chain, resolved.message),
        };
        Ok(self.conclude(verdict, value, resolved.message))
    }

    fn run_chain(mut self, chain: ChainFn, message: Option<String>) -> ValidatorResult<Self> {
        if let Some(message) = message {
            self = self.message(message);
        }
        let rules = chain(self)?;
        if !rules.v.is_settled() {
            let value = rules.current_value();
            rules.v.set_validated(value);
        }
        Ok(rules)
    }

    fn check(self, rule: impl Rule) -> Self {
        if self.v.is_settled() {
            return self;
        }
        let value = self.current_value();
        let verdict = rule.check(&value);
        self.conclude(verdict, value, None)
    }

    fn current_value(&self) -> Value {
        self.v.current_value().cloned().unwrap_or(Value::Null)
    }

    fn conclude(self, verdict: Verdict, value: Value, message: Option<String>) -> Self {
        match verdict {
            Verdict::Pass => self.v.set_validated(value),
            Verdict::Replace(replacement) => {
                trace!(field = %self.v.current_key(), "rule replaced value");
                self.v.replace_current(replacement.clone());
                self.v.set_validated(replacement);
            }
            Verdict::Fail => {
                debug!(field = %self.v.current_key(), value = %value, "rule rejected value");
                self.v.set_error(message.as_deref());
            }
        }
        self
    }
}

fn matches_expected(actual: Option<&Value>, expect: &Value) -> bool {
    let actual = actual.unwrap_or(&Value::Null);
    match expect {
        Value::Array(choices) => choices.contains(actual),
        single => actual == single,
    }
}
