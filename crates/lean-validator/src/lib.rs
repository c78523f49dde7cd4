//! # lean-validator
//!
//! Per-field validation for nested, dynamically typed input such as parsed
//! JSON request bodies. Rules are chained on one field at a time; failures
//! are collected under dotted paths while the fields that passed form a
//! filtered copy of the input.
//!
//! ```
//! use lean_validator::Validator;
//! use serde_json::json;
//!
//! let mut v = Validator::make(json!({ "age": 10 }));
//! v.field("age").required().int(18, 99);
//!
//! assert!(!v.is_valid());
//! assert_eq!(v.errors().get("age").len(), 1);
//! assert!(v.validated().is_err());
//! ```

pub mod config;
pub mod error;
pub mod field;
mod kana;
mod nested;
mod resolver;
pub mod rules;
pub mod sanitizer;
pub mod traits;
pub mod validator;
pub mod validators;

// Re-exports for easy access
pub use config::{ValidatorConfig, ValidatorConfigBuilder};
pub use error::{ValidationErrors, ValidatorError, ValidatorResult};
pub use field::{FieldRules, Requirement};
pub use rules::{Alias, ChainFn, Predicate, RuleRef, RuleTable, Verdict};
pub use sanitizer::Sanitizer;
pub use traits::{FromRuleArgs, Rule, RuleFactory};
pub use validator::{FieldState, Validator};
pub use validators::{ja, net, Builtin, Filter};
