//! Object schema validation.
//!
//! This module provides [`ObjectSchema`]: an explicit table of field name to
//! field validator, plus whole-object rules such as date ordering. The table
//! is what forms consult to validate one field at a time.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::codes;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::FieldPath;

use super::format::{check_date, END_BEFORE_START_MESSAGE};
use super::string::required_error;
use super::traits::{value_type_name, SchemaLike, ValueValidator};
use super::collect;

/// Definition of a field within an object schema.
struct FieldDef {
    schema: Box<dyn ValueValidator>,
    required: bool,
}

/// A whole-object rule that may look at several fields at once.
type ObjectRule =
    Box<dyn Fn(&Map<String, Value>, &FieldPath) -> Validation<(), ValidationErrors> + Send + Sync>;

/// A schema for validating JSON objects.
///
/// Required fields must be present and non-blank. Optional fields that are
/// absent, `null` or blank are skipped without running their schema and left
/// out of the validated map. Unknown keys are rejected once
/// `additional_properties(false)` is set. Every field error and every rule
/// error is accumulated.
///
/// # Example
///
/// ```rust
/// use vitae::{FieldPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string())
///     .optional("url", Schema::string().url())
///     .additional_properties(false);
///
/// let result = schema.validate(&json!({"name": "Acme", "url": ""}), &FieldPath::root());
/// assert!(result.is_success());
///
/// let result = schema.validate(&json!({"url": "ftp://acme.com", "x": 1}), &FieldPath::root());
/// assert_eq!(result.into_result().unwrap_err().len(), 3);
/// ```
pub struct ObjectSchema {
    fields: IndexMap<String, FieldDef>,
    deny_unknown: bool,
    rules: Vec<ObjectRule>,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates a new object schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            deny_unknown: false,
            rules: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds a required field to the schema.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Box::new(schema),
                required: true,
            },
        );
        self
    }

    /// Adds an optional field to the schema.
    pub fn optional<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                schema: Box::new(schema),
                required: false,
            },
        );
        self
    }

    /// Allows (`true`) or rejects (`false`) keys the schema does not declare.
    pub fn additional_properties(mut self, allow: bool) -> Self {
        self.deny_unknown = !allow;
        self
    }

    /// Adds a whole-object rule.
    ///
    /// Rules see the raw object and the object's own path, and should attach
    /// each error to the most specific field they can.
    pub fn custom<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Map<String, Value>, &FieldPath) -> Validation<(), ValidationErrors>
            + Send
            + Sync
            + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Requires `end` to be on or after `start` when both are valid dates.
    ///
    /// The error is attached to the `end` field. Missing or malformed dates
    /// are left to the field validators.
    pub fn date_range(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        let (start, end) = (start.into(), end.into());
        self.custom(move |obj, path| {
            let date = |key: &str| {
                obj.get(key)
                    .and_then(Value::as_str)
                    .and_then(|s| check_date(s).ok())
            };
            match (date(start.as_str()), date(end.as_str())) {
                (Some(from), Some(to)) if to < from => {
                    Validation::Failure(ValidationErrors::single(
                        ValidationError::new(codes::date::END_BEFORE_START, END_BEFORE_START_MESSAGE)
                            .with_field(path.push_field(end.as_str()))
                            .with_i18n("validation.date.end_before_start")
                            .with_param("startDate", from.to_string())
                            .with_param("endDate", to.to_string()),
                    ))
                }
                _ => Validation::Success(()),
            }
        })
    }

    /// Sets a custom error message for non-object values.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns whether `name` is optional, or `None` if it is not declared.
    pub fn is_optional(&self, name: &str) -> Option<bool> {
        self.fields.get(name).map(|def| !def.required)
    }

    /// Validates a value against this schema.
    pub fn validate(
        &self,
        value: &Value,
        path: &FieldPath,
    ) -> Validation<Map<String, Value>, ValidationErrors> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return Validation::Failure(ValidationErrors::single(self.type_error(value, path))),
        };

        let mut errors = Vec::new();
        let mut validated = Map::new();

        for (name, def) in &self.fields {
            let field_path = path.push_field(name.as_str());
            match check_field(def, obj.get(name), &field_path) {
                Some(Validation::Success(v)) => {
                    validated.insert(name.clone(), v);
                }
                Some(Validation::Failure(e)) => errors.extend(e),
                // Blank optional input counts as absent.
                None => {}
            }
        }

        for (key, raw) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            if self.deny_unknown {
                errors.push(
                    ValidationError::new(codes::shape::UNKNOWN_FIELD, format!("Unknown field '{}'", key))
                        .with_field(path.push_field(key.as_str()))
                        .with_param("field", key.as_str()),
                );
            } else {
                validated.insert(key.clone(), raw.clone());
            }
        }

        for rule in &self.rules {
            if let Validation::Failure(e) = rule(obj, path) {
                errors.extend(e);
            }
        }

        collect(validated, errors)
    }

    /// Validates a single declared field of `data`, including any whole-object
    /// rule errors attached to that field.
    ///
    /// Returns `None` if `name` is not declared. An absent optional field
    /// validates to `null`.
    pub fn validate_field(
        &self,
        name: &str,
        data: &Value,
        path: &FieldPath,
    ) -> Option<Validation<Value, ValidationErrors>> {
        let def = self.fields.get(name)?;
        let field_path = path.push_field(name);
        let field_key = field_path.to_string();
        let obj = data.as_object();
        let raw = obj.and_then(|o| o.get(name));

        let mut errors = Vec::new();
        let mut validated = raw.cloned().unwrap_or(Value::Null);
        match check_field(def, raw, &field_path) {
            Some(Validation::Success(v)) => validated = v,
            Some(Validation::Failure(e)) => errors.extend(e),
            None => {}
        }

        if let Some(obj) = obj {
            for rule in &self.rules {
                if let Validation::Failure(e) = rule(obj, path) {
                    errors.extend(e.into_iter().filter(|e| e.is_for_field(&field_key)));
                }
            }
        }

        Some(collect(validated, errors))
    }

    fn type_error(&self, value: &Value, path: &FieldPath) -> ValidationError {
        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| "Expected an object".to_string());
        ValidationError::new(codes::shape::INVALID_TYPE, message)
            .with_field(path.clone())
            .with_param("expected", "object")
            .with_param("got", value_type_name(value))
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Self::Output, ValidationErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, ValidationErrors> {
        self.validate(value, path).map(Value::Object)
    }
}

/// Returns true for values an optional field treats as "not provided".
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Runs one field's checks; `None` means an optional field was skipped.
fn check_field(
    def: &FieldDef,
    raw: Option<&Value>,
    field_path: &FieldPath,
) -> Option<Validation<Value, ValidationErrors>> {
    match raw {
        Some(v) if !is_blank(v) => Some(def.schema.validate_value(v, field_path)),
        _ if def.required => Some(Validation::Failure(ValidationErrors::single(required_error(
            field_path,
        )))),
        _ => None,
    }
}
