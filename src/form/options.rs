use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Form behaviour knobs, loadable from JSON or any serde source.
///
/// ```rust
/// use vitae::form::FormOptions;
///
/// let options: FormOptions = serde_json::from_str(r#"{"debounceMs": 0}"#).unwrap();
/// assert!(options.debounce().is_zero());
/// assert_eq!(FormOptions::default().debounce_ms, 300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormOptions {
    /// Delay before a debounced field validation runs. Zero validates
    /// immediately.
    pub debounce_ms: u64,
}

impl FormOptions {
    /// The debounce delay as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}
