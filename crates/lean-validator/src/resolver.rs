//! Turns a rule reference plus arguments into something callable

use crate::error::{ValidatorError, ValidatorResult};
use crate::rules::{ChainFn, Predicate, RuleRef, RuleTable};
use crate::traits::{Rule, RuleFactory};
use crate::validators::Builtin;
use serde_json::Value;
use tracing::{trace, warn};

/// Alias chains deeper than this are treated as unresolvable
const MAX_ALIAS_DEPTH: usize = 16;

pub(crate) enum Dispatch {
    Builtin { builtin: Builtin, args: Vec<Value> },
    Predicate { predicate: Predicate, args: Vec<Value> },
    Chain(ChainFn),
    External(Box<dyn Rule>),
}

pub(crate) struct Resolved {
    pub dispatch: Dispatch,
    /// Trailing string argument taken as the failure message
    pub message: Option<String>,
}

pub(crate) fn resolve(table: &RuleTable, rule: RuleRef, args: Vec<Value>) -> ValidatorResult<Resolved> {
    resolve_at(table, rule, args, 0)
}

fn resolve_at(table: &RuleTable, rule: RuleRef, args: Vec<Value>, depth: usize) -> ValidatorResult<Resolved> {
    match rule {
        RuleRef::Named(name) => resolve_name(table, &name, args, depth),
        RuleRef::Predicate(predicate) => {
            if let Some(name) = predicate.name().filter(|name| table.is_rule_name(name)) {
                trace!(rule = name, "predicate refers to a known rule");
                let name = name.to_string();
                return resolve_name(table, &name, args, depth);
            }
            Ok(run_predicate(predicate, args))
        }
        RuleRef::Chain(chain) => {
            let (_, message) = split_message(Some(0), args);
            Ok(Resolved {
                dispatch: Dispatch::Chain(chain),
                message,
            })
        }
        RuleRef::External(factory) => build_external(factory.as_ref(), args),
    }
}

fn resolve_name(table: &RuleTable, name: &str, args: Vec<Value>, depth: usize) -> ValidatorResult<Resolved> {
    if depth > MAX_ALIAS_DEPTH {
        warn!(rule = name, "alias chain too deep");
        return Err(ValidatorError::RuleNotFound(name.to_string()));
    }

    if let Some(alias) = table.get_alias(name) {
        trace!(rule = name, target = %alias.rule.describe(), "resolved alias");
        let mut full = alias.args.clone();
        full.extend(args);
        // A named predicate registered under its own name is the rule itself
        if let RuleRef::Predicate(predicate) = &alias.rule {
            if predicate.name() == Some(name) {
                return Ok(run_predicate(predicate.clone(), full));
            }
        }
        return resolve_at(table, alias.rule.clone(), full, depth + 1);
    }

    if let Ok(builtin) = name.parse::<Builtin>() {
        trace!(rule = name, "resolved built-in");
        let (args, message) = split_message(Some(builtin.arity()), args);
        return Ok(Resolved {
            dispatch: Dispatch::Builtin { builtin, args },
            message,
        });
    }

    if let Some(factory) = table.get_external(name) {
        trace!(rule = name, "resolved external rule");
        return build_external(factory.as_ref(), args);
    }

    warn!(rule = name, "rule is not defined");
    Err(ValidatorError::RuleNotFound(name.to_string()))
}

fn run_predicate(predicate: Predicate, args: Vec<Value>) -> Resolved {
    let (args, message) = split_message(predicate.arity(), args);
    Resolved {
        dispatch: Dispatch::Predicate { predicate, args },
        message,
    }
}

fn build_external(factory: &dyn RuleFactory, args: Vec<Value>) -> ValidatorResult<Resolved> {
    let (args, message) = split_message(Some(factory.arity()), args);
    Ok(Resolved {
        dispatch: Dispatch::External(factory.build(&args)?),
        message,
    })
}

/// Pop a trailing string when exactly one argument more than `arity` was given
pub(crate) fn split_message(arity: Option<usize>, mut args: Vec<Value>) -> (Vec<Value>, Option<String>) {
    let Some(arity) = arity else {
        return (args, None);
    };
    if args.len() == arity + 1 && args.last().is_some_and(Value::is_string) {
        if let Some(Value::String(message)) = args.pop() {
            return (args, Some(message));
        }
    }
    (args, None)
}
