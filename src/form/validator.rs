//! Field and whole-form validation for one form session.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::outcome::Outcome;
use crate::resume::SectionValidator;
use crate::schema::is_blank;

use super::state::ValidationState;

/// Validates one form against a [`SectionValidator`] and keeps its state.
///
/// Each instance owns its [`ValidationState`]; share the section validator,
/// not the form.
///
/// # Example
///
/// ```rust
/// use vitae::form::FormValidator;
/// use serde_json::json;
///
/// let mut form = FormValidator::basics();
/// let data = json!({"name": "", "email": "jane@example.com"});
///
/// assert!(!form.validate_field(&data, "name"));
/// assert!(form.is_dirty("name"));
/// assert_eq!(form.error("name"), Some("Name is required"));
/// ```
pub struct FormValidator {
    section: Arc<SectionValidator>,
    state: ValidationState,
}

impl FormValidator {
    /// Creates a pristine form over `section`.
    pub fn new(section: impl Into<Arc<SectionValidator>>) -> Self {
        Self {
            section: section.into(),
            state: ValidationState::new(),
        }
    }

    /// A form for the `basics` section.
    pub fn basics() -> Self {
        Self::new(SectionValidator::basics())
    }

    /// A form for one `work` entry.
    pub fn work() -> Self {
        Self::new(SectionValidator::work())
    }

    /// A form for one `education` entry.
    pub fn education() -> Self {
        Self::new(SectionValidator::education())
    }

    /// A form for one `skills` entry.
    pub fn skill() -> Self {
        Self::new(SectionValidator::skill())
    }

    /// A form for one `projects` entry.
    pub fn project() -> Self {
        Self::new(SectionValidator::project())
    }

    /// The section validator this form runs.
    pub fn section(&self) -> &SectionValidator {
        &self.section
    }

    /// Validates one field, updating that field's entries only.
    ///
    /// The field is marked dirty first. An optional field with absent or
    /// blank input is valid without running any check. `last_result` holds
    /// this field's outcome afterwards, keyed by the field name (empty when
    /// the field was skipped). Returns whether the field (and anything
    /// nested under it) is now free of errors.
    pub fn validate_field(&mut self, data: &Value, field: &str) -> bool {
        self.state.mark_dirty(field);
        self.state.clear_field(field);

        if self.section.is_optional(field) && data.get(field).map_or(true, is_blank) {
            tracing::trace!(section = self.section.name(), field, "optional field left blank");
            self.state.last_result = Some(Outcome::success(Map::new()));
            return true;
        }

        let outcome = self.section.validate_field(data, field);
        self.state.record(outcome.issues(), field);
        let key = field.to_string();
        self.state.last_result = Some(outcome.map(|value| Map::from_iter([(key, value)])));

        let valid = self.state.field_is_valid(field);
        tracing::debug!(section = self.section.name(), field, valid, "validated field");
        valid
    }

    /// Validates the whole form, replacing all errors, warnings and dirty
    /// fields.
    ///
    /// Every top-level key of `data` becomes dirty. Returns true when no
    /// error was found.
    pub fn validate_form(&mut self, data: &Value) -> bool {
        self.state.errors.clear();
        self.state.warnings.clear();
        self.state.dirty_fields.clear();

        if let Some(obj) = data.as_object() {
            for key in obj.keys() {
                self.state.mark_dirty(key);
            }
        }

        let (outcome, issues) = self.section.report(data);
        self.state.record(&issues, "");
        self.state.last_result = Some(outcome);

        let valid = self.state.errors.is_empty();
        tracing::debug!(
            section = self.section.name(),
            valid,
            errors = self.state.errors.len(),
            warnings = self.state.warnings.len(),
            "validated form"
        );
        valid
    }

    /// Marks `field` dirty without validating it.
    pub fn mark_dirty(&mut self, field: &str) {
        self.state.mark_dirty(field);
    }

    /// True once `field` has been validated or marked, until reset.
    pub fn is_dirty(&self, field: &str) -> bool {
        self.state.dirty_fields.contains(field)
    }

    /// Clears errors, warnings, dirty fields and the last result.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// True when no error is recorded anywhere in the form.
    pub fn is_valid(&self) -> bool {
        self.state.errors.is_empty()
    }

    /// The recorded error message at `field`, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.state.errors.get(field).map(String::as_str)
    }

    /// The recorded warning message at `field`, if any.
    pub fn warning(&self, field: &str) -> Option<&str> {
        self.state.warnings.get(field).map(String::as_str)
    }

    /// The current errors, warnings, dirty fields and last outcome.
    pub fn state(&self) -> &ValidationState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{basics_schema, BusinessRules};
    use serde_json::json;

    #[test]
    fn test_optional_blank_short_circuits() {
        let mut form = FormValidator::basics();
        assert!(form.validate_field(&json!({"url": "  "}), "url"));
        assert!(form.is_dirty("url"));
        assert!(form.state().errors.is_empty());
    }

    #[test]
    fn test_stale_entry_cleared() {
        let mut form = FormValidator::basics();
        assert!(!form.validate_field(&json!({"email": "jane@"}), "email"));
        assert_eq!(form.error("email"), Some("Invalid email format"));

        assert!(form.validate_field(&json!({"email": "jane@example.com"}), "email"));
        assert_eq!(form.error("email"), None);
    }

    #[test]
    fn test_field_validity_ignores_other_fields() {
        let mut form = FormValidator::basics();
        let data = json!({"name": "", "email": "jane@example.com"});
        assert!(!form.validate_field(&data, "name"));
        assert!(form.validate_field(&data, "email"));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_warning_does_not_block() {
        let mut form = FormValidator::basics();
        let data = json!({"name": "Jane", "email": "jane@example.com", "summary": "Hi"});
        assert!(form.validate_form(&data));
        assert!(form.warning("summary").is_some());
        assert!(form.state().last_result.as_ref().unwrap().is_success());
    }

    #[test]
    fn test_field_call_records_last_result() {
        let mut form = FormValidator::basics();
        form.validate_field(&json!({"email": "jane@"}), "email");
        let last = form.state().last_result.clone().unwrap();
        assert_eq!(last.errors()[0].code, crate::codes::email::INVALID);

        form.validate_field(&json!({"email": "jane@example.com"}), "email");
        let last = form.state().last_result.clone().unwrap();
        assert_eq!(last.value().and_then(|m| m.get("email")), Some(&json!("jane@example.com")));

        form.validate_field(&json!({}), "url");
        assert_eq!(form.state().last_result, Some(Outcome::success(Map::new())));
    }

    #[test]
    fn test_custom_section() {
        let section = SectionValidator::new(
            "contact",
            basics_schema(),
            BusinessRules::new().require("phone", "missing_phone", "Phone is required"),
        );
        let mut form = FormValidator::new(section);
        assert!(!form.validate_field(&json!({}), "phone"));
        assert_eq!(form.error("phone"), Some("Phone is required"));
    }
}
