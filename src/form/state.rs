//! Per-form validation state.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::outcome::Outcome;

/// What a UI reads after each validate call.
///
/// `errors` and `warnings` hold the first message per field path. Dirty
/// fields only ever grow until [`ValidationState::clear`] is called.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationState {
    pub errors: IndexMap<String, String>,
    pub warnings: IndexMap<String, String>,
    pub dirty_fields: IndexSet<String>,
    /// Outcome of the most recent validate call. A whole-form call stores
    /// the validated object; a field call stores a map holding only that
    /// field.
    pub last_result: Option<Outcome<Map<String, Value>>>,
}

impl ValidationState {
    /// Creates an empty, pristine state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears everything, including dirty fields.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn mark_dirty(&mut self, field: &str) {
        if !self.dirty_fields.contains(field) {
            self.dirty_fields.insert(field.to_string());
        }
    }

    /// Drops error and warning entries at `field` or nested below it.
    pub(crate) fn clear_field(&mut self, field: &str) {
        let probe = |key: &String| !covers(field, key);
        self.errors.retain(|key, _| probe(key));
        self.warnings.retain(|key, _| probe(key));
    }

    /// Records issues, keeping the first message per path. Issues without a
    /// field land under `fallback`.
    pub(crate) fn record<'a, I>(&mut self, issues: I, fallback: &str)
    where
        I: IntoIterator<Item = &'a ValidationError>,
    {
        for issue in issues {
            let key = issue.field.clone().unwrap_or_else(|| fallback.to_string());
            let map = if issue.is_error() {
                &mut self.errors
            } else {
                &mut self.warnings
            };
            map.entry(key).or_insert_with(|| issue.message.clone());
        }
    }

    /// Returns true if no error is recorded at `field` or below it.
    pub fn field_is_valid(&self, field: &str) -> bool {
        !self.errors.keys().any(|key| covers(field, key))
    }
}

fn covers(field: &str, key: &str) -> bool {
    key == field
        || key
            .strip_prefix(field)
            .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FieldPath;

    #[test]
    fn test_record_keeps_first_message() {
        let mut state = ValidationState::new();
        let first = ValidationError::new("a", "first").with_field(FieldPath::from_field("name"));
        let second = ValidationError::new("b", "second").with_field(FieldPath::from_field("name"));
        state.record([&first, &second], "");
        assert_eq!(state.errors.get("name").map(String::as_str), Some("first"));
    }

    #[test]
    fn test_clear_field_includes_nested() {
        let mut state = ValidationState::new();
        state.errors.insert("profiles[0].url".into(), "bad".into());
        state.errors.insert("profilesExtra".into(), "other".into());
        state.warnings.insert("profiles".into(), "hm".into());

        state.clear_field("profiles");

        assert_eq!(state.errors.len(), 1);
        assert!(state.warnings.is_empty());
        assert!(state.field_is_valid("profiles"));
        assert!(!state.field_is_valid("profilesExtra"));
    }
}
