//! Validation issue types.
//!
//! This module provides [`ValidationError`] for single problems (errors or
//! advisory warnings) and [`ValidationErrors`] for accumulating them.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stillwater::prelude::*;

use crate::path::FieldPath;

/// Whether an issue blocks validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks validity; the owning outcome is a failure.
    Error,
    /// Advisory only; the owning outcome stays a success.
    Warning,
}

/// Where a validation rule originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Core invariants of the resume itself (shape, formats, date order).
    Domain,
    /// Orchestration-level policy such as business required-field wording.
    Application,
    /// Feedback that only exists for the UI.
    Presentation,
}

/// A single validation problem with full context.
///
/// - **code**: stable identifier of the kind of problem, see [`crate::codes`]
/// - **message**: literal human-readable text, used when no catalog entry applies
/// - **field**: dotted path into the validated object (see [`FieldPath`]), when applicable
/// - **severity** / **layer**: how the problem is graded and who raised it
/// - **i18n_key** / **i18n_params**: optional translation lookup
///
/// # Example
///
/// ```rust
/// use vitae::{codes, FieldPath, Layer, Severity, ValidationError};
///
/// let error = ValidationError::new(codes::date::INVALID_FORMAT, "Date must be in YYYY-MM-DD format")
///     .with_field(FieldPath::from_field("startDate"))
///     .with_i18n("errors.date.format")
///     .with_param("value", "01-01-2020");
///
/// assert_eq!(error.severity, Severity::Error);
/// assert_eq!(error.layer, Layer::Domain);
/// assert_eq!(error.field_name().as_deref(), Some("startDate"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Path to the offending value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Error or warning.
    pub severity: Severity,
    /// Originating layer.
    pub layer: Layer,
    /// Translation key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i18n_key: Option<String>,
    /// Values interpolated into the translated text.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub i18n_params: Map<String, Value>,
}

impl ValidationError {
    /// Creates a domain-layer error with the given code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            severity: Severity::Error,
            layer: Layer::Domain,
            i18n_key: None,
            i18n_params: Map::new(),
        }
    }

    /// Creates a domain-layer warning with the given code and message.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message).with_severity(Severity::Warning)
    }

    /// Sets the field path. A root path clears the field.
    pub fn with_field(mut self, path: FieldPath) -> Self {
        self.field = if path.is_root() {
            None
        } else {
            Some(path.to_string())
        };
        self
    }

    /// Sets the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the originating layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Sets the translation key.
    pub fn with_i18n(mut self, key: impl Into<String>) -> Self {
        self.i18n_key = Some(key.into());
        self
    }

    /// Adds a translation parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.i18n_params.insert(name.into(), value.into());
        self
    }

    /// Returns true if this issue blocks validity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns true if this issue is advisory.
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Returns the field path as a string, if any.
    pub fn field_name(&self) -> Option<String> {
        self.field.clone()
    }

    /// Returns true if this issue is attached to exactly `field`.
    pub fn is_for_field(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }

    /// Returns true if this issue is attached to `field` or to anything below
    /// it, so `work` covers `work[0].startDate` but not `workplace`.
    pub fn is_within(&self, field: &str) -> bool {
        match self.field.as_deref() {
            Some(own) => {
                own == field
                    || own
                        .strip_prefix(field)
                        .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
            }
            None => false,
        }
    }

    /// Re-roots the field path under `prefix`, e.g. `email` becomes `basics.email`.
    pub fn nested_under(mut self, prefix: &FieldPath) -> Self {
        if prefix.is_root() {
            return self;
        }
        self.field = Some(match self.field.take() {
            Some(field) if field.starts_with('[') => format!("{}{}", prefix, field),
            Some(field) => format!("{}.{}", prefix, field),
            None => prefix.to_string(),
        });
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}", field, self.message),
            None => write!(f, "(root): {}", self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A non-empty collection of validation issues.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationError>` so a failure can
/// never be constructed without at least one issue. It implements `Semigroup`,
/// which is how errors from independent checks accumulate.
///
/// ```rust
/// use vitae::{ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let name = ValidationErrors::single(ValidationError::new("required_field", "required"));
/// let email = ValidationErrors::single(ValidationError::new("invalid_email", "bad email"));
///
/// assert_eq!(name.combine(email).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection containing a single issue.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of issues in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `Vec`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained issues.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns all issues attached to `field`.
    pub fn for_field(&self, field: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.is_for_field(field)).collect()
    }

    /// Returns all issues with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first issue.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Returns the messages in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    /// Converts this collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::single(error)
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_defaults() {
        let error = ValidationError::new("required_field", "This field is required");

        assert_eq!(error.code, "required_field");
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(error.layer, Layer::Domain);
        assert!(error.field.is_none());
        assert!(error.i18n_key.is_none());
        assert!(error.i18n_params.is_empty());
    }

    #[test]
    fn test_warning_constructor() {
        let warning = ValidationError::warning("vague_position", "Be more specific");
        assert!(warning.is_warning());
        assert!(!warning.is_error());
    }

    #[test]
    fn test_root_field_is_cleared() {
        let error = ValidationError::new("x", "y").with_field(FieldPath::root());
        assert!(error.field.is_none());
    }

    #[test]
    fn test_nested_under() {
        let prefix = FieldPath::from_field("work").push_index(2);

        let error = ValidationError::new("x", "y")
            .with_field(FieldPath::from_field("startDate"))
            .nested_under(&prefix);
        assert_eq!(error.field.as_deref(), Some("work[2].startDate"));

        let whole = ValidationError::new("x", "y").nested_under(&prefix);
        assert_eq!(whole.field.as_deref(), Some("work[2]"));

        let indexed = ValidationError::new("x", "y")
            .with_field("[0].url".parse().unwrap())
            .nested_under(&FieldPath::from_field("profiles"));
        assert_eq!(indexed.field.as_deref(), Some("profiles[0].url"));
    }

    #[test]
    fn test_is_within() {
        let error = ValidationError::new("x", "y").with_field("work[0].startDate".parse().unwrap());
        assert!(error.is_within("work"));
        assert!(error.is_within("work[0]"));
        assert!(error.is_within("work[0].startDate"));
        assert!(!error.is_within("workplace"));
        assert!(!error.is_within("work[0].start"));
        assert!(!ValidationError::new("x", "y").is_within("work"));
    }

    #[test]
    fn test_display() {
        let error = ValidationError::new("invalid_email", "Invalid email format")
            .with_field(FieldPath::from_field("email"));
        assert_eq!(error.to_string(), "email: Invalid email format");

        let root = ValidationError::new("invalid_type", "Expected an object");
        assert_eq!(root.to_string(), "(root): Expected an object");
    }

    #[test]
    fn test_serializes_camel_case() {
        let error = ValidationError::warning("generic_skill", "Too generic")
            .with_layer(Layer::Application)
            .with_field(FieldPath::from_field("name"))
            .with_i18n("skills.generic")
            .with_param("skill", "teamwork");

        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(
            value,
            json!({
                "code": "generic_skill",
                "message": "Too generic",
                "field": "name",
                "severity": "warning",
                "layer": "application",
                "i18nKey": "skills.generic",
                "i18nParams": {"skill": "teamwork"}
            })
        );
    }

    #[test]
    fn test_errors_from_empty_vec_is_none() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_errors_combine_preserves_order() {
        let first = ValidationErrors::single(ValidationError::new("a", "first"));
        let second = ValidationErrors::single(ValidationError::new("b", "second"));
        let third = ValidationErrors::single(ValidationError::new("c", "third"));

        let combined = first.combine(second).combine(third);
        assert_eq!(combined.messages(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_errors_for_field_and_code() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationError::new("a", "1").with_field(FieldPath::from_field("email")),
            ValidationError::new("b", "2").with_field(FieldPath::from_field("email")),
            ValidationError::new("a", "3").with_field(FieldPath::from_field("name")),
        ])
        .unwrap();

        assert_eq!(errors.for_field("email").len(), 2);
        assert_eq!(errors.for_field("phone").len(), 0);
        assert_eq!(errors.with_code("a").len(), 2);
    }

    #[test]
    fn test_errors_display() {
        let errors = ValidationErrors::single(
            ValidationError::new("required_field", "required")
                .with_field(FieldPath::from_field("name")),
        );
        let display = errors.to_string();
        assert!(display.contains("1 issue(s)"));
        assert!(display.contains("name: required"));
    }
}
