//! Rule references and the rule table they are resolved against

use crate::error::ValidatorResult;
use crate::field::FieldRules;
use crate::traits::{FromRuleArgs, RuleFactory, TypeFactory};
use crate::validators::Builtin;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Outcome of a single rule application.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Pass,
    Fail,
    /// Pass, storing this value in place of the input value
    Replace(Value),
}

impl Verdict {
    pub fn passed(&self) -> bool {
        !matches!(self, Verdict::Fail)
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

type PredicateFn = dyn Fn(&Value, &[Value]) -> Verdict + Send + Sync;

/// An ad-hoc rule: a callable taking the field value and the call's arguments.
///
/// A predicate may carry a name. When that name matches an alias or built-in
/// rule, the predicate acts as a reference to that rule and its body is not
/// run. A declared arity enables the trailing-message convention.
#[derive(Clone)]
pub struct Predicate {
    name: Option<String>,
    arity: Option<usize>,
    func: Arc<PredicateFn>,
}

impl Predicate {
    pub fn new<F, R>(func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        Self {
            name: None,
            arity: None,
            func: Arc::new(move |value, args| func(value, args).into()),
        }
    }

    /// A predicate over the value alone (declared arity 0)
    pub fn unary<F, R>(func: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        Self::new(move |value, _args: &[Value]| func(value)).with_arity(0)
    }

    pub fn named<F, R>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        Self::unary(func).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn call(&self, value: &Value, args: &[Value]) -> Verdict {
        (self.func)(value, args)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A callable that drives the rule chain of the field it is applied to.
pub type ChainFn =
    Arc<dyn for<'a> Fn(FieldRules<'a>) -> ValidatorResult<FieldRules<'a>> + Send + Sync>;

/// Everything a caller can hand to [`FieldRules::apply`].
#[derive(Clone)]
pub enum RuleRef {
    /// Alias, built-in or registered external rule, looked up by name
    Named(String),
    Predicate(Predicate),
    /// Rules applied to the same field; the field's error state decides
    Chain(ChainFn),
    /// Rule object built from the call's arguments
    External(Arc<dyn RuleFactory>),
}

impl RuleRef {
    pub fn named(name: impl Into<String>) -> Self {
        RuleRef::Named(name.into())
    }

    pub fn predicate<F, R>(func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        RuleRef::Predicate(Predicate::new(func))
    }

    pub fn chain<F>(func: F) -> Self
    where
        F: for<'a> Fn(FieldRules<'a>) -> ValidatorResult<FieldRules<'a>> + Send + Sync + 'static,
    {
        RuleRef::Chain(Arc::new(func))
    }

    pub fn external(factory: impl RuleFactory + 'static) -> Self {
        RuleRef::External(Arc::new(factory))
    }

    /// Name used for logging
    pub fn describe(&self) -> String {
        match self {
            RuleRef::Named(name) => name.clone(),
            RuleRef::Predicate(predicate) => predicate.name().unwrap_or("{predicate}").to_string(),
            RuleRef::Chain(_) => "{chain}".to_string(),
            RuleRef::External(factory) => factory.name().to_string(),
        }
    }
}

impl fmt::Debug for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            RuleRef::Predicate(predicate) => f.debug_tuple("Predicate").field(predicate).finish(),
            RuleRef::Chain(_) => f.write_str("Chain"),
            RuleRef::External(factory) => f.debug_tuple("External").field(&factory.name()).finish(),
        }
    }
}

impl From<&str> for RuleRef {
    fn from(name: &str) -> Self {
        RuleRef::Named(name.to_string())
    }
}

impl From<String> for RuleRef {
    fn from(name: String) -> Self {
        RuleRef::Named(name)
    }
}

impl From<Builtin> for RuleRef {
    fn from(builtin: Builtin) -> Self {
        RuleRef::Named(builtin.name().to_string())
    }
}

impl From<Predicate> for RuleRef {
    fn from(predicate: Predicate) -> Self {
        RuleRef::Predicate(predicate)
    }
}

impl From<Arc<dyn RuleFactory>> for RuleRef {
    fn from(factory: Arc<dyn RuleFactory>) -> Self {
        RuleRef::External(factory)
    }
}

/// A rule reference stored under another name, with leading arguments.
#[derive(Debug, Clone)]
pub struct Alias {
    pub rule: RuleRef,
    pub args: Vec<Value>,
}

/// Named rules available to a session: aliases and external rule factories.
///
/// Built-in predicates are always available and need no entry here.
#[derive(Clone, Default)]
pub struct RuleTable {
    aliases: HashMap<String, Alias>,
    externals: HashMap<String, Arc<dyn RuleFactory>>,
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut aliases: Vec<_> = self.aliases.keys().collect();
        aliases.sort();
        let mut externals: Vec<_> = self.externals.keys().collect();
        externals.sort();
        f.debug_struct("RuleTable")
            .field("aliases", &aliases)
            .field("externals", &externals)
            .finish()
    }
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock aliases over the built-in predicates
    pub fn standard() -> Self {
        Self::new()
            .alias("email", Builtin::FilterVar, vec![json!("email")])
            .alias("float", Builtin::FilterVar, vec![json!("float")])
            .alias("url", Builtin::FilterVar, vec![json!("url")])
            .alias("alnum", Builtin::Regex, vec![json!(r"^[a-zA-Z0-9]+$")])
            .alias("alpha", Builtin::Regex, vec![json!(r"^[a-zA-Z]+$")])
            .alias("numeric", Builtin::Regex, vec![json!(r"^[0-9]+$")])
            .alias("alpha_dash", Builtin::Regex, vec![json!(r"^[a-zA-Z0-9_\-]+$")])
    }

    /// Register `name` as `rule` called with `args` ahead of the caller's own
    pub fn alias(mut self, name: impl Into<String>, rule: impl Into<RuleRef>, args: Vec<Value>) -> Self {
        self.aliases.insert(
            name.into(),
            Alias {
                rule: rule.into(),
                args,
            },
        );
        self
    }

    /// Register a rule type that builds itself from arguments
    pub fn register<R: FromRuleArgs>(self, name: impl Into<String>) -> Self {
        self.register_factory(TypeFactory::<R>::new(name))
    }

    /// Register a factory under its own name
    pub fn register_factory(mut self, factory: impl RuleFactory + 'static) -> Self {
        self.externals
            .insert(factory.name().to_string(), Arc::new(factory));
        self
    }

    pub fn get_alias(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    pub fn get_external(&self, name: &str) -> Option<&Arc<dyn RuleFactory>> {
        self.externals.get(name)
    }

    /// Whether `name` is an alias or a built-in predicate
    pub fn is_rule_name(&self, name: &str) -> bool {
        self.aliases.contains_key(name) || name.parse::<Builtin>().is_ok()
    }

    /// Check if there are any entries defined
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.externals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aliases.len() + self.externals.len()
    }
}
