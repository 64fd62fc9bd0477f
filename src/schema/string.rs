//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! required-ness, length bounds, regex patterns and well-known formats.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::codes;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::FieldPath;

use super::format::Format;
use super::traits::{value_type_name, SchemaLike};

/// Message for a blank required value.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        pattern_str: String,
        message: Option<String>,
    },
    Format {
        format: Format,
    },
}

/// A schema for validating string values.
///
/// A blank value on a `required()` schema reports only the required-field
/// error. Otherwise every failing constraint is reported; each format
/// contributes at most one error.
///
/// # Example
///
/// ```rust
/// use vitae::{FieldPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::string().required().date();
///
/// assert!(schema.validate(&json!("2020-01-01"), &FieldPath::root()).is_success());
/// assert!(schema.validate(&json!("01-01-2020"), &FieldPath::root()).is_failure());
/// assert!(schema.validate(&json!("   "), &FieldPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct StringSchema {
    required: bool,
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self {
            required: false,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires the value to be non-empty after trimming whitespace.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds a minimum length constraint, counted in characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Adds a maximum length constraint, counted in characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Adds a regex pattern constraint.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            pattern_str: pattern.to_string(),
            message: None,
        });
        Ok(self)
    }

    /// Requires an ISO `YYYY-MM-DD` calendar date.
    pub fn date(mut self) -> Self {
        self.constraints.push(StringConstraint::Format {
            format: Format::Date,
        });
        self
    }

    /// Requires an absolute http(s) URL.
    pub fn url(mut self) -> Self {
        self.constraints.push(StringConstraint::Format {
            format: Format::Url,
        });
        self
    }

    /// Requires an email address.
    pub fn email(mut self) -> Self {
        self.constraints.push(StringConstraint::Format {
            format: Format::Email,
        });
        self
    }

    /// Sets a custom error message for the most recent length or pattern constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not a string). Format messages are fixed.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = Some(message.into()),
            Some(StringConstraint::Format { .. }) => {}
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Returns true if a blank value is an error.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &FieldPath) -> Validation<String, ValidationErrors> {
        let s = match value.as_str() {
            Some(s) => s,
            None if value.is_null() && self.required => {
                return Validation::Failure(ValidationErrors::single(required_error(path)));
            }
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "Expected a string".to_string());
                return Validation::Failure(ValidationErrors::single(
                    ValidationError::new(codes::shape::INVALID_TYPE, message)
                        .with_field(path.clone())
                        .with_param("expected", "string")
                        .with_param("got", value_type_name(value)),
                ));
            }
        };

        if self.required && s.trim().is_empty() {
            return Validation::Failure(ValidationErrors::single(required_error(path)));
        }

        let errors: Vec<ValidationError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        match ValidationErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(s.to_string()),
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &FieldPath) -> Validation<String, ValidationErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &FieldPath) -> Validation<Value, ValidationErrors> {
        self.validate(value, path).map(Value::String)
    }
}

/// The generic required-field error raised by schemas.
pub(crate) fn required_error(path: &FieldPath) -> ValidationError {
    ValidationError::new(codes::shape::REQUIRED_FIELD, REQUIRED_MESSAGE)
        .with_field(path.clone())
        .with_i18n("validation.required")
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &FieldPath,
) -> Option<ValidationError> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("Must be at least {} characters", min));
                ValidationError::new(codes::shape::TOO_SHORT, msg)
                    .with_field(path.clone())
                    .with_i18n("validation.too_short")
                    .with_param("min", *min)
                    .with_param("actual", len)
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("Must be at most {} characters", max));
                ValidationError::new(codes::shape::TOO_LONG, msg)
                    .with_field(path.clone())
                    .with_i18n("validation.too_long")
                    .with_param("max", *max)
                    .with_param("actual", len)
            })
        }
        StringConstraint::Pattern {
            regex,
            pattern_str,
            message,
        } => (!regex.is_match(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("Must match pattern '{}'", pattern_str));
            ValidationError::new(codes::shape::INVALID_FORMAT, msg)
                .with_field(path.clone())
                .with_param("pattern", pattern_str.as_str())
        }),
        StringConstraint::Format { format } => format.check(value, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_string() {
        let schema = StringSchema::new();
        let result = schema.validate(&json!("hello"), &FieldPath::root());
        assert_eq!(result.into_result().unwrap(), "hello");
    }

    #[test]
    fn test_rejects_non_string() {
        let schema = StringSchema::new();
        for value in [json!(42), json!(true), json!([1]), json!({"a": 1}), json!(null)] {
            let errors = unwrap_failure(schema.validate(&value, &FieldPath::root()));
            assert_eq!(errors.first().code, codes::shape::INVALID_TYPE);
        }
    }

    #[test]
    fn test_required_rejects_blank_and_null() {
        let schema = StringSchema::new().required().min_len(3);
        for value in [json!(""), json!("   "), json!(null)] {
            let errors = unwrap_failure(schema.validate(&value, &FieldPath::from_field("name")));
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.first().code, codes::shape::REQUIRED_FIELD);
            assert_eq!(errors.first().field.as_deref(), Some("name"));
        }
    }

    #[test]
    fn test_optional_accepts_empty() {
        let schema = StringSchema::new().max_len(5);
        assert!(schema.validate(&json!(""), &FieldPath::root()).is_success());
    }

    #[test]
    fn test_length_constraints() {
        let schema = StringSchema::new().min_len(2).max_len(4);
        assert!(schema.validate(&json!("abc"), &FieldPath::root()).is_success());

        let errors = unwrap_failure(schema.validate(&json!("a"), &FieldPath::root()));
        assert_eq!(errors.first().code, codes::shape::TOO_SHORT);

        let errors = unwrap_failure(schema.validate(&json!("abcde"), &FieldPath::root()));
        assert_eq!(errors.first().code, codes::shape::TOO_LONG);
    }

    #[test]
    fn test_unicode_length() {
        let schema = StringSchema::new().max_len(3);
        assert!(schema.validate(&json!("日本語"), &FieldPath::root()).is_success());
    }

    #[test]
    fn test_pattern_and_custom_message() {
        let schema = StringSchema::new()
            .pattern(r"^\+?[0-9 ()-]+$")
            .unwrap()
            .error("Phone may only contain digits");

        let errors = unwrap_failure(schema.validate(&json!("call me"), &FieldPath::root()));
        assert_eq!(errors.first().code, codes::shape::INVALID_FORMAT);
        assert_eq!(errors.first().message, "Phone may only contain digits");
    }

    #[test]
    fn test_invalid_regex_pattern() {
        assert!(StringSchema::new().pattern(r"[invalid").is_err());
    }

    #[test]
    fn test_accumulates_independent_constraints() {
        let schema = StringSchema::new().max_len(5).url();
        let errors = unwrap_failure(schema.validate(&json!("ftp://acme.com"), &FieldPath::root()));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.with_code(codes::shape::TOO_LONG).len(), 1);
        assert_eq!(errors.with_code(codes::url::INVALID_SCHEME).len(), 1);
    }

    #[test]
    fn test_format_reports_one_error() {
        let schema = StringSchema::new().date();
        let errors = unwrap_failure(schema.validate(&json!("2020-13-45"), &FieldPath::root()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, codes::date::INVALID_VALUE);
    }
}
