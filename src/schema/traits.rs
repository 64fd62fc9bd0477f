//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] lets string, object and array schemas be composed, so a
//! section schema can hold any of them as a field validator.

use serde_json::Value;
use stillwater::Validation;

use crate::error::ValidationErrors;
use crate::path::FieldPath;

/// A schema that validates JSON values.
///
/// The `Send + Sync` bounds allow schemas to live in shared form validators
/// and trait objects like `Box<dyn ValueValidator>`.
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates a value against this schema, accumulating every issue.
    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Self::Output, ValidationErrors>;

    /// Validates a value and returns the result as a `serde_json::Value`.
    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, ValidationErrors>;
}

/// A type-erased schema that validates to JSON values.
///
/// Any `SchemaLike` is a `ValueValidator`; object and array schemas store
/// their children this way.
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the result as a `serde_json::Value`.
    fn validate_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, ValidationErrors>;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, ValidationErrors> {
        self.validate_to_value(value, path)
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
