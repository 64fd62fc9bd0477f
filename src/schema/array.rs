//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating lists of section
//! entries (work history, education, skills) and lists of strings.

use serde_json::Value;
use stillwater::Validation;

use crate::codes;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::FieldPath;

use super::collect;
use super::traits::{value_type_name, SchemaLike};

/// A schema for validating array values.
///
/// Each item is validated at its own indexed path (`work[2]`), and errors
/// from every item are accumulated together with length violations.
///
/// # Example
///
/// ```rust
/// use vitae::{FieldPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string().required()).max_len(2);
///
/// assert!(schema.validate(&json!(["rust", "sql"]), &FieldPath::root()).is_success());
///
/// let errors = schema
///     .validate(&json!(["rust", "", "go"]), &FieldPath::from_field("keywords"))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub struct ArraySchema<S> {
    item_schema: S,
    min_len: Option<usize>,
    max_len: Option<usize>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema with the given item schema.
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            min_len: None,
            max_len: None,
            type_error_message: None,
        }
    }

    /// Requires at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    /// Allows at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Sets a custom error message for non-array values.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Vec<Value>, ValidationErrors> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "Expected a list".to_string());
                return Validation::Failure(ValidationErrors::single(
                    ValidationError::new(codes::shape::INVALID_TYPE, message)
                        .with_field(path.clone())
                        .with_param("expected", "array")
                        .with_param("got", value_type_name(value)),
                ));
            }
        };

        let mut errors = Vec::new();

        if let Some(min) = self.min_len.filter(|min| arr.len() < *min) {
            errors.push(
                ValidationError::new(codes::shape::TOO_SHORT, format!("Must have at least {} items", min))
                    .with_field(path.clone())
                    .with_param("min", min)
                    .with_param("actual", arr.len()),
            );
        }
        if let Some(max) = self.max_len.filter(|max| arr.len() > *max) {
            errors.push(
                ValidationError::new(codes::shape::TOO_LONG, format!("Must have at most {} items", max))
                    .with_field(path.clone())
                    .with_param("max", max)
                    .with_param("actual", arr.len()),
            );
        }

        let mut validated_items = Vec::with_capacity(arr.len());
        for (index, item) in arr.iter().enumerate() {
            let item_path = path.push_index(index);
            match self.item_schema.validate_to_value(item, &item_path) {
                Validation::Success(v) => validated_items.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        collect(validated_items, errors)
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<Value>;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<Self::Output, ValidationErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, ValidationErrors> {
        self.validate(value, path).map(Value::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StringSchema;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_rejects_non_array() {
        let schema = ArraySchema::new(StringSchema::new());
        let errors = unwrap_failure(schema.validate(&json!({"a": 1}), &FieldPath::root()));
        assert_eq!(errors.first().code, codes::shape::INVALID_TYPE);
    }

    #[test]
    fn test_empty_array_is_valid_without_min() {
        let schema = ArraySchema::new(StringSchema::new());
        assert!(schema.validate(&json!([]), &FieldPath::root()).is_success());
    }

    #[test]
    fn test_length_bounds() {
        let schema = ArraySchema::new(StringSchema::new()).min_len(1).max_len(2);

        let errors = unwrap_failure(schema.validate(&json!([]), &FieldPath::root()));
        assert_eq!(errors.first().code, codes::shape::TOO_SHORT);

        let errors = unwrap_failure(schema.validate(&json!(["a", "b", "c"]), &FieldPath::root()));
        assert_eq!(errors.first().code, codes::shape::TOO_LONG);
    }

    #[test]
    fn test_item_errors_carry_index() {
        let schema = ArraySchema::new(StringSchema::new().url());
        let errors = unwrap_failure(schema.validate(
            &json!(["https://a.io", "ftp://b.io", "nope"]),
            &FieldPath::from_field("links"),
        ));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().field.as_deref(), Some("links[1]"));
    }
}
