//! Translation of catalog text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("valid placeholder regex"));

/// Failure inside a translator.
///
/// The catalog never propagates these: it logs them and falls back to the
/// literal message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("no translations for locale '{0}'")]
    UnknownLocale(String),

    #[error("translation backend failed: {0}")]
    Backend(String),
}

/// Resolves translation keys to localized text.
pub trait Translator: Send + Sync {
    /// Returns the text for `key` in `locale` with `params` interpolated, or
    /// `Ok(None)` if the key has no translation.
    fn translate(
        &self,
        locale: &str,
        key: &str,
        params: &Map<String, Value>,
    ) -> Result<Option<String>, TranslateError>;
}

/// An in-memory translator keyed by locale then key.
///
/// Templates use `{name}` placeholders filled from the message parameters.
/// Placeholders without a matching parameter are left as written.
///
/// ```rust
/// use vitae::catalog::{StaticTranslator, Translator};
/// use serde_json::{json, Map};
///
/// let translator = StaticTranslator::new()
///     .with("fr", "validation.too_long", "Au plus {max} caractères");
///
/// let mut params = Map::new();
/// params.insert("max".into(), json!(100));
/// assert_eq!(
///     translator.translate("fr", "validation.too_long", &params).unwrap().as_deref(),
///     Some("Au plus 100 caractères")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticTranslator {
    bundles: HashMap<String, HashMap<String, String>>,
}

impl StaticTranslator {
    /// Creates a translator with no bundles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one template.
    pub fn with(mut self, locale: &str, key: &str, template: &str) -> Self {
        self.insert(locale, key, template);
        self
    }

    /// Adds one template in place.
    pub fn insert(&mut self, locale: &str, key: &str, template: &str) {
        self.bundles
            .entry(locale.to_string())
            .or_default()
            .insert(key.to_string(), template.to_string());
    }

    /// Returns true if any template exists for `locale`.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.bundles.contains_key(locale)
    }
}

impl Translator for StaticTranslator {
    fn translate(
        &self,
        locale: &str,
        key: &str,
        params: &Map<String, Value>,
    ) -> Result<Option<String>, TranslateError> {
        let bundle = self
            .bundles
            .get(locale)
            .ok_or_else(|| TranslateError::UnknownLocale(locale.to_string()))?;
        Ok(bundle.get(key).map(|template| interpolate(template, params)))
    }
}

/// Fills `{name}` placeholders from `params`.
pub fn interpolate(template: &str, params: &Map<String, Value>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match params.get(&caps[1]) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Resolves `key` through `translator`, falling back to `fallback` when there
/// is no translator, no key, no translation, or the translator fails.
pub(crate) fn resolve(
    translator: Option<&dyn Translator>,
    locale: &str,
    key: Option<&str>,
    params: &Map<String, Value>,
    fallback: &str,
) -> String {
    let (Some(translator), Some(key)) = (translator, key) else {
        return fallback.to_string();
    };
    match translator.translate(locale, key, params) {
        Ok(Some(text)) => text,
        Ok(None) => {
            tracing::trace!(locale, key, "no translation; using literal message");
            fallback.to_string()
        }
        Err(error) => {
            tracing::warn!(locale, key, %error, "translation failed; using literal message");
            fallback.to_string()
        }
    }
}
