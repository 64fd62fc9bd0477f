use serde::{Deserialize, Serialize};

/// Catalog behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Memoize per-field lists so repeat calls return the same `Arc`.
    pub cache: bool,
    /// Initial locale for resolving translated text.
    pub locale: String,
}

impl CatalogOptions {
    /// Turns per-field memoization on or off.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the starting locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            cache: true,
            locale: "en".to_string(),
        }
    }
}
