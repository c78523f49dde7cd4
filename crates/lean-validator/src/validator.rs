//! Validation session: input, validated output, errors and the field cursor

use crate::config::ValidatorConfig;
use crate::error::{ValidationErrors, ValidatorError, ValidatorResult};
use crate::field::FieldRules;
use crate::rules::RuleTable;
use crate::validators::required::is_present;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Status of the currently selected field.
///
/// `Error` and `Skipped` are sticky until the next selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Clean,
    Ok,
    Error,
    Skipped,
}

fn standard_rules() -> Arc<RuleTable> {
    static RULES: OnceLock<Arc<RuleTable>> = OnceLock::new();
    Arc::clone(RULES.get_or_init(|| Arc::new(RuleTable::standard())))
}

fn default_config() -> Arc<ValidatorConfig> {
    static CONFIG: OnceLock<Arc<ValidatorConfig>> = OnceLock::new();
    Arc::clone(CONFIG.get_or_init(|| Arc::new(ValidatorConfig::default())))
}

/// One validation pass over a map of input values.
///
/// Select a field with [`field`](Self::field), chain rules on the returned
/// [`FieldRules`], then read [`is_valid`](Self::is_valid),
/// [`errors`](Self::errors) and [`validated`](Self::validated).
///
/// ```
/// use lean_validator::Validator;
/// use serde_json::json;
///
/// let mut v = Validator::make(json!({ "name": "John", "age": 30, "extra": 1 }));
/// v.field("name").required().string();
/// v.field("age").required().int(18, 99);
///
/// assert!(v.is_valid());
/// assert_eq!(
///     serde_json::Value::Object(v.into_validated().unwrap()),
///     json!({ "name": "John", "age": 30 })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    data: Map<String, Value>,
    validated: Map<String, Value>,
    errors: ValidationErrors,
    current_key: String,
    state: FieldState,
    /// Value rewritten by a rule on the current field
    working: Option<Value>,
    error_message: Option<String>,
    rules: Arc<RuleTable>,
    config: Arc<ValidatorConfig>,
}

impl Validator {
    /// Create a session over a map of input values
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            validated: Map::new(),
            errors: ValidationErrors::new(),
            current_key: String::new(),
            state: FieldState::Clean,
            working: None,
            error_message: None,
            rules: standard_rules(),
            config: default_config(),
        }
    }

    /// Create a session from any value.
    ///
    /// Objects are validated by key and lists by index (`"0"`, `"1"`, ...).
    /// A string, number or boolean is validated as a whole under the
    /// unkeyed path `""`; see [`value`](Self::value). Null yields an empty
    /// session.
    pub fn make(data: Value) -> Self {
        match data {
            Value::Object(map) => Self::new(map),
            Value::Array(items) => Self::new(index_keyed(items)),
            Value::Null => Self::new(Map::new()),
            scalar => {
                let mut map = Map::new();
                map.insert(String::new(), scalar);
                Self::new(map)
            }
        }
    }

    pub fn with_rules(mut self, rules: Arc<RuleTable>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: Arc<ValidatorConfig>) -> Self {
        self.config = config;
        self
    }

    /// A session over nested data sharing this session's rules and config
    pub(crate) fn spawn(&self, data: Map<String, Value>) -> Self {
        Self::new(data)
            .with_rules(Arc::clone(&self.rules))
            .with_config(Arc::clone(&self.config))
    }

    // ----- field selection -----

    /// Select `key` and start a rule chain for it
    pub fn field(&mut self, key: impl Into<String>) -> FieldRules<'_> {
        self.select(key.into(), None);
        FieldRules::new(self)
    }

    /// Select `key` with a message used by every failing rule that has none
    pub fn field_with_message(&mut self, key: impl Into<String>, message: impl Into<String>) -> FieldRules<'_> {
        self.select(key.into(), Some(message.into()));
        FieldRules::new(self)
    }

    /// Select the whole value of a session made from a scalar
    pub fn value(&mut self) -> FieldRules<'_> {
        self.field("")
    }

    pub(crate) fn select(&mut self, key: String, message: Option<String>) {
        self.current_key = key;
        self.state = FieldState::Clean;
        self.working = None;
        self.error_message = message;
    }

    // ----- current field -----

    pub fn current_key(&self) -> &str {
        &self.current_key
    }

    /// The value rules see: a rewritten value if a rule produced one, else the input
    pub fn current_value(&self) -> Option<&Value> {
        self.working
            .as_ref()
            .or_else(|| self.data.get(&self.current_key))
    }

    /// Present, not null and not the empty string
    pub fn has_value(&self) -> bool {
        is_present(self.current_value())
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_current_error(&self) -> bool {
        self.state == FieldState::Error
    }

    pub fn is_current_ok(&self) -> bool {
        self.state != FieldState::Error
    }

    pub fn is_skipped(&self) -> bool {
        self.state == FieldState::Skipped
    }

    /// Error or Skipped: no further rule may touch this field
    pub(crate) fn is_settled(&self) -> bool {
        matches!(self.state, FieldState::Error | FieldState::Skipped)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub(crate) fn set_error_message(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Record an error for the current field and mark it failed.
    ///
    /// Falls back to the field's message, then the configured default.
    pub fn set_error(&mut self, message: Option<&str>) {
        let message = message
            .or(self.error_message.as_deref())
            .unwrap_or(self.config.get_default_message().as_str())
            .to_string();
        debug!(field = %self.current_key, %message, "field failed");
        self.errors.add(message, &[self.current_key.as_str()]);
        self.state = FieldState::Error;
    }

    /// Write the current field's output value unless it failed or was skipped
    pub(crate) fn set_validated(&mut self, value: Value) {
        if self.is_settled() {
            return;
        }
        self.validated.insert(self.current_key.clone(), value);
        self.state = FieldState::Ok;
    }

    /// Write a value for the current field, then stop evaluating it
    pub(crate) fn skip_with(&mut self, value: Option<Value>) {
        if let Some(value) = value {
            self.validated.insert(self.current_key.clone(), value);
        }
        self.state = FieldState::Skipped;
    }

    pub(crate) fn replace_current(&mut self, value: Value) {
        self.working = Some(value);
    }

    /// Fold a child session's errors in under the current field and mark it failed
    pub(crate) fn merge_errors(&mut self, child: ValidationErrors) {
        debug!(
            field = %self.current_key,
            paths = child.len(),
            "merging nested errors"
        );
        self.errors.merge(child, &[self.current_key.as_str()]);
        self.state = FieldState::Error;
    }

    // ----- session-wide -----

    /// Raw input value for any key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The raw input
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    /// First message of every failed path
    pub fn errors_flat(&self) -> IndexMap<String, String> {
        self.errors.flatten()
    }

    /// Fields that passed every rule applied to them
    pub fn validated(&self) -> ValidatorResult<&Map<String, Value>> {
        if self.is_valid() {
            Ok(&self.validated)
        } else {
            Err(ValidatorError::ValidationFailed(self.errors.clone()))
        }
    }

    pub fn into_validated(self) -> ValidatorResult<Map<String, Value>> {
        self.into_outcome().map_err(ValidatorError::ValidationFailed)
    }

    pub(crate) fn into_outcome(self) -> Result<Map<String, Value>, ValidationErrors> {
        if self.is_valid() {
            Ok(self.validated)
        } else {
            Err(self.errors)
        }
    }

    /// Validated whole value of a session made from a scalar
    pub fn validated_value(&self) -> ValidatorResult<Option<&Value>> {
        Ok(self.validated()?.get(""))
    }
}

pub(crate) fn index_keyed(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (index.to_string(), item))
        .collect()
}
