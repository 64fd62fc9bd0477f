//! Catalog entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Display text for one error code.
///
/// `message` is the literal fallback; `display` is what the catalog resolved
/// for the current locale and is what UIs should render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i18n_key: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub i18n_params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl ErrorMessage {
    /// Creates an entry for `code` with literal text `message`.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            i18n_key: None,
            i18n_params: Map::new(),
            display: None,
        }
    }

    /// Attaches the entry to a field path.
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the translation key.
    pub fn with_i18n(mut self, key: impl Into<String>) -> Self {
        self.i18n_key = Some(key.into());
        self
    }

    /// Adds an interpolation parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.i18n_params.insert(name.into(), value.into());
        self
    }

    /// The resolved text, or the literal message if nothing was resolved.
    pub fn text(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.message)
    }
}

impl From<&ValidationError> for ErrorMessage {
    fn from(issue: &ValidationError) -> Self {
        Self {
            code: issue.code.clone(),
            message: issue.message.clone(),
            field: issue.field.clone(),
            i18n_key: issue.i18n_key.clone(),
            i18n_params: issue.i18n_params.clone(),
            display: None,
        }
    }
}

/// Contextual help for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpMessage {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Show without the user asking, e.g. on first focus.
    #[serde(default)]
    pub auto_show: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i18n_key: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub i18n_params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl HelpMessage {
    /// Creates a help entry.
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            field: None,
            auto_show: false,
            i18n_key: None,
            i18n_params: Map::new(),
            display: None,
        }
    }

    /// Attaches the help to a field path.
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Flags the entry for the auto-show list.
    pub fn auto_show(mut self) -> Self {
        self.auto_show = true;
        self
    }

    /// Sets the translation key for the content.
    pub fn with_i18n(mut self, key: impl Into<String>) -> Self {
        self.i18n_key = Some(key.into());
        self
    }

    /// The resolved content, or the literal content if nothing was resolved.
    pub fn text(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FieldPath;
    use serde_json::json;

    #[test]
    fn test_from_issue_copies_lookup_data() {
        let issue = ValidationError::new("too_long", "Must be at most 100 characters")
            .with_field(FieldPath::from_field("summary"))
            .with_i18n("validation.too_long")
            .with_param("max", 100);

        let message = ErrorMessage::from(&issue);
        assert_eq!(message.field.as_deref(), Some("summary"));
        assert_eq!(message.i18n_params.get("max"), Some(&json!(100)));
        assert_eq!(message.text(), "Must be at most 100 characters");
    }

    #[test]
    fn test_help_deserializes_with_defaults() {
        let help: HelpMessage = serde_json::from_value(json!({
            "id": "h1",
            "title": "Dates",
            "content": "Use YYYY-MM-DD"
        }))
        .unwrap();
        assert!(!help.auto_show);
        assert!(help.field.is_none());
    }
}
