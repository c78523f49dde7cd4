//! Validation of object-shaped and list-shaped fields through child sessions.
//!
//! A child session shares the parent's rule table and config. Its errors are
//! merged under the parent field's path, and its validated output becomes the
//! parent field's value only when every child passed. A missing, null or empty
//! string field counts as an empty object or list; any other shape fails the
//! parent field itself, without child paths.

use crate::error::{ValidationErrors, ValidatorResult};
use crate::field::FieldRules;
use crate::rules::RuleRef;
use crate::validator::{index_keyed, Validator};
use crate::validators::required::is_present;
use serde_json::{Map, Value};
use tracing::trace;

enum Shape<T> {
    Absent,
    Expected(T),
    Mismatch,
}

impl<'v> FieldRules<'v> {
    /// Validate an object-valued field with `callback` on a child session.
    ///
    /// ```
    /// use lean_validator::Validator;
    /// use serde_json::json;
    ///
    /// let mut v = Validator::make(json!({ "address": { "post_code": "1231234" } }));
    /// v.field("address")
    ///     .as_object(|child| {
    ///         child.field("post_code").required().regex(r"^\d{3}-\d{4}$")?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    ///
    /// assert!(v.errors().has("address.post_code"));
    /// assert!(!v.errors().has("address"));
    /// ```
    pub fn as_object<F>(self, callback: F) -> ValidatorResult<Self>
    where
        F: FnOnce(&mut Validator) -> ValidatorResult<()>,
    {
        if self.v.is_settled() {
            return Ok(self);
        }
        let data = match self.object_shape() {
            Shape::Absent => Map::new(),
            Shape::Expected(map) => map,
            Shape::Mismatch => return Ok(self.set_error(None)),
        };

        let mut child = self.v.spawn(data);
        callback(&mut child)?;
        match child.into_outcome() {
            Ok(validated) => self.v.set_validated(Value::Object(validated)),
            Err(errors) => self.v.merge_errors(errors),
        }
        Ok(self)
    }

    /// Apply `rule` with `args` to every element of a list-valued field.
    ///
    /// Elements are keyed by index. Every element is checked before the
    /// field's outcome is decided. When an element is skipped without a
    /// value, the output becomes an object keyed by the original indices so
    /// later elements keep their positions.
    pub fn as_list(self, rule: impl Into<RuleRef>, args: Vec<Value>) -> ValidatorResult<Self> {
        if self.v.is_settled() {
            return Ok(self);
        }
        let items = match self.list_shape() {
            Shape::Absent => Vec::new(),
            Shape::Expected(items) => items,
            Shape::Mismatch => return Ok(self.set_error(None)),
        };

        let rule = rule.into();
        let message = self.v.error_message().map(str::to_string);
        let mut child = self.v.spawn(index_keyed(items));
        let keys: Vec<String> = child.data().keys().cloned().collect();
        trace!(field = %self.v.current_key(), elements = keys.len(), "validating list");

        for key in keys {
            let element = match &message {
                Some(message) => child.field_with_message(key, message.clone()),
                None => child.field(key),
            };
            element.apply(rule.clone(), args.clone())?;
        }

        match child.into_outcome() {
            Ok(validated) => self.v.set_validated(list_output(validated)),
            Err(errors) => self.v.merge_errors(errors),
        }
        Ok(self)
    }

    /// Validate each object in a list-valued field with its own child session.
    ///
    /// An element that is not an object is reported at its index with the
    /// configured not-an-object message and not descended into.
    pub fn as_list_object<F>(self, mut callback: F) -> ValidatorResult<Self>
    where
        F: FnMut(&mut Validator) -> ValidatorResult<()>,
    {
        if self.v.is_settled() {
            return Ok(self);
        }
        let items = match self.list_shape() {
            Shape::Absent => Vec::new(),
            Shape::Expected(items) => items,
            Shape::Mismatch => return Ok(self.set_error(None)),
        };

        let mut errors = ValidationErrors::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let key = index.to_string();
            let Value::Object(map) = item else {
                errors.add(self.v.config().get_not_an_object_message().clone(), &[key.as_str()]);
                continue;
            };
            let mut child = self.v.spawn(map);
            callback(&mut child)?;
            match child.into_outcome() {
                Ok(object) => validated.push(Value::Object(object)),
                Err(child_errors) => errors.merge(child_errors, &[key.as_str()]),
            }
        }

        if errors.is_empty() {
            self.v.set_validated(Value::Array(validated));
        } else {
            self.v.merge_errors(errors);
        }
        Ok(self)
    }

    fn object_shape(&self) -> Shape<Map<String, Value>> {
        match self.v.current_value() {
            value if !is_present(value) => Shape::Absent,
            Some(Value::Object(map)) => Shape::Expected(map.clone()),
            Some(_) | None => Shape::Mismatch,
        }
    }

    fn list_shape(&self) -> Shape<Vec<Value>> {
        match self.v.current_value() {
            value if !is_present(value) => Shape::Absent,
            Some(Value::Array(items)) => Shape::Expected(items.clone()),
            Some(_) | None => Shape::Mismatch,
        }
    }
}

/// A list when the validated keys are still `0..n` in order, otherwise the
/// index-keyed map itself.
fn list_output(validated: Map<String, Value>) -> Value {
    let dense = validated
        .keys()
        .enumerate()
        .all(|(index, key)| key.parse::<usize>() == Ok(index));
    if dense {
        Value::Array(validated.into_iter().map(|(_, value)| value).collect())
    } else {
        Value::Object(validated)
    }
}
