//! The message catalog handle.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ValidationError;

use super::loader::MessageLoader;
use super::message::{ErrorMessage, HelpMessage};
use super::options::CatalogOptions;
use super::translate::{interpolate, resolve, Translator};

#[derive(Default)]
struct State {
    errors: IndexMap<String, ErrorMessage>,
    help: IndexMap<String, HelpMessage>,
    errors_by_field: HashMap<String, Arc<Vec<ErrorMessage>>>,
    help_by_field: HashMap<String, Arc<Vec<HelpMessage>>>,
    loading: HashSet<String>,
    locale: String,
}

impl State {
    fn invalidate(&mut self) {
        self.errors_by_field.clear();
        self.help_by_field.clear();
    }
}

/// Maps error codes and help ids to display text.
///
/// A catalog is an explicit object: build one, populate it, hand clones of
/// the handle to whoever needs lookups, and reset it when the session ends.
/// Clones share state.
///
/// Per-field lists are memoized when caching is on, so a repeat call
/// returns the same `Arc` until the catalog changes. Any add, replace,
/// reset or locale change drops the memoized lists.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use vitae::catalog::{CatalogOptions, ErrorMessage, MessageCatalog};
///
/// let catalog = MessageCatalog::new(CatalogOptions::default());
/// catalog.add_error_messages([
///     ErrorMessage::new("ERR1", "First").for_field("field1"),
///     ErrorMessage::new("ERR2", "Second").for_field("field2"),
///     ErrorMessage::new("ERR3", "Third").for_field("field1"),
/// ]);
///
/// let first = catalog.errors_for_field("field1");
/// let codes: Vec<_> = first.iter().map(|m| m.code.as_str()).collect();
/// assert_eq!(codes, vec!["ERR1", "ERR3"]);
/// assert!(Arc::ptr_eq(&first, &catalog.errors_for_field("field1")));
/// assert!(catalog.errors_for_field("field3").is_empty());
/// ```
#[derive(Clone)]
pub struct MessageCatalog {
    state: Arc<RwLock<State>>,
    auto_show: Arc<watch::Sender<Arc<Vec<HelpMessage>>>>,
    translator: Option<Arc<dyn Translator>>,
    loader: Option<Arc<dyn MessageLoader>>,
    cache: bool,
}

impl MessageCatalog {
    /// Creates an empty catalog with no translator or loader.
    pub fn new(options: CatalogOptions) -> Self {
        let state = State {
            locale: options.locale,
            ..State::default()
        };
        let (auto_show, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            state: Arc::new(RwLock::new(state)),
            auto_show: Arc::new(auto_show),
            translator: None,
            loader: None,
            cache: options.cache,
        }
    }

    /// Resolves display text through `translator` from now on, starting
    /// with the entries already registered.
    pub fn with_translator<T: Translator + 'static>(mut self, translator: T) -> Self {
        self.translator = Some(Arc::new(translator));
        self.relocalize();
        self
    }

    /// Fetches missing entries through `loader` in the background.
    pub fn with_loader<L: MessageLoader + 'static>(mut self, loader: L) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Registers initial entries.
    pub fn with_messages(
        self,
        errors: impl IntoIterator<Item = ErrorMessage>,
        help: impl IntoIterator<Item = HelpMessage>,
    ) -> Self {
        self.add_error_messages(errors);
        self.add_help_messages(help);
        self
    }

    /// The current locale.
    pub fn locale(&self) -> String {
        self.state.read().locale.clone()
    }

    /// Whether per-field lists are memoized.
    pub fn is_caching(&self) -> bool {
        self.cache
    }

    /// Registers one error entry. See [`MessageCatalog::add_error_messages`].
    pub fn add_error_message(&self, message: ErrorMessage) {
        self.add_error_messages([message]);
    }

    /// Registers error entries, replacing any with the same code in place.
    pub fn add_error_messages(&self, messages: impl IntoIterator<Item = ErrorMessage>) {
        let mut state = self.state.write();
        let locale = state.locale.clone();
        for mut message in messages {
            self.localize_error(&mut message, &locale);
            state.errors.insert(message.code.clone(), message);
        }
        state.invalidate();
    }

    /// Registers one help entry.
    pub fn add_help_message(&self, message: HelpMessage) {
        self.add_help_messages([message]);
    }

    /// Registers help entries, replacing any with the same id in place.
    pub fn add_help_messages(&self, messages: impl IntoIterator<Item = HelpMessage>) {
        let mut state = self.state.write();
        let locale = state.locale.clone();
        for mut message in messages {
            self.localize_help(&mut message, &locale);
            state.help.insert(message.id.clone(), message);
        }
        state.invalidate();
        self.publish_auto_show(&state);
    }

    /// Looks up an error entry by code.
    ///
    /// On a miss with a loader configured, a background load is started and
    /// this call still returns `None`.
    pub fn get_error_message(&self, code: &str) -> Option<ErrorMessage> {
        if let Some(message) = self.state.read().errors.get(code) {
            return Some(message.clone());
        }
        self.spawn_load(LoadKind::Error, code);
        None
    }

    /// Looks up a help entry by id, loading it in the background on a miss.
    pub fn get_help_message(&self, id: &str) -> Option<HelpMessage> {
        if let Some(message) = self.state.read().help.get(id) {
            return Some(message.clone());
        }
        self.spawn_load(LoadKind::Help, id);
        None
    }

    /// All error entries attached to `field`, in registration order.
    pub fn errors_for_field(&self, field: &str) -> Arc<Vec<ErrorMessage>> {
        if !self.cache {
            let state = self.state.read();
            return Arc::new(collect_for_field(state.errors.values(), field, |m| &m.field));
        }
        if let Some(hit) = self.state.read().errors_by_field.get(field) {
            return Arc::clone(hit);
        }
        let mut state = self.state.write();
        let computed = Arc::new(collect_for_field(state.errors.values(), field, |m| &m.field));
        Arc::clone(state.errors_by_field.entry(field.to_string()).or_insert(computed))
    }

    /// All help entries attached to `field`, in registration order.
    pub fn help_for_field(&self, field: &str) -> Arc<Vec<HelpMessage>> {
        if !self.cache {
            let state = self.state.read();
            return Arc::new(collect_for_field(state.help.values(), field, |m| &m.field));
        }
        if let Some(hit) = self.state.read().help_by_field.get(field) {
            return Arc::clone(hit);
        }
        let mut state = self.state.write();
        let computed = Arc::new(collect_for_field(state.help.values(), field, |m| &m.field));
        Arc::clone(state.help_by_field.entry(field.to_string()).or_insert(computed))
    }

    /// Replaces every error entry.
    pub fn set_error_catalogue(&self, messages: impl IntoIterator<Item = ErrorMessage>) {
        let mut state = self.state.write();
        let locale = state.locale.clone();
        state.errors = messages
            .into_iter()
            .map(|mut message| {
                self.localize_error(&mut message, &locale);
                (message.code.clone(), message)
            })
            .collect();
        state.invalidate();
        tracing::debug!(entries = state.errors.len(), "replaced error catalogue");
    }

    /// Replaces every help entry.
    pub fn set_help_catalogue(&self, messages: impl IntoIterator<Item = HelpMessage>) {
        let mut state = self.state.write();
        let locale = state.locale.clone();
        state.help = messages
            .into_iter()
            .map(|mut message| {
                self.localize_help(&mut message, &locale);
                (message.id.clone(), message)
            })
            .collect();
        state.invalidate();
        self.publish_auto_show(&state);
        tracing::debug!(entries = state.help.len(), "replaced help catalogue");
    }

    /// Drops every entry. Background loads still in flight may register
    /// into the emptied catalog when they finish.
    pub fn reset_catalogue(&self) {
        let mut state = self.state.write();
        state.errors.clear();
        state.help.clear();
        state.invalidate();
        self.publish_auto_show(&state);
        tracing::debug!("reset catalogue");
    }

    /// Help entries flagged `auto_show`, in registration order.
    pub fn auto_show_help(&self) -> Arc<Vec<HelpMessage>> {
        Arc::clone(&self.auto_show.borrow())
    }

    /// A receiver that sees the auto-show list every time it changes.
    pub fn subscribe_auto_show(&self) -> watch::Receiver<Arc<Vec<HelpMessage>>> {
        self.auto_show.subscribe()
    }

    /// Switches locale and re-resolves every entry's display text in place.
    pub fn set_locale(&self, locale: &str) {
        let mut state = self.state.write();
        if state.locale == locale {
            return;
        }
        state.locale = locale.to_string();
        let locale = state.locale.clone();
        for message in state.errors.values_mut() {
            self.localize_error(message, &locale);
        }
        for message in state.help.values_mut() {
            self.localize_help(message, &locale);
        }
        state.invalidate();
        self.publish_auto_show(&state);
        tracing::debug!(locale = %locale, "catalogue locale changed");
    }

    /// Follows a locale source: applies its current value now and every
    /// later change until the sender is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when called outside a tokio runtime.
    pub fn watch_locale(
        &self,
        mut locale: watch::Receiver<String>,
    ) -> Result<JoinHandle<()>, TryCurrentError> {
        let handle = Handle::try_current()?;
        let current = locale.borrow_and_update().clone();
        self.set_locale(&current);

        let catalog = self.clone();
        Ok(handle.spawn(async move {
            while locale.changed().await.is_ok() {
                let next = locale.borrow_and_update().clone();
                catalog.set_locale(&next);
            }
            tracing::trace!("locale source closed");
        }))
    }

    /// Display text for a validation issue.
    ///
    /// A catalog entry for the issue's code wins, with the issue's own
    /// parameters filled in. Otherwise the issue's translation key is
    /// resolved, and failing that its literal message is used.
    pub fn message_for_issue(&self, issue: &ValidationError) -> String {
        let locale = self.locale();
        match self.get_error_message(&issue.code) {
            Some(entry) => {
                let mut params = entry.i18n_params.clone();
                params.extend(issue.i18n_params.clone());
                let fallback = interpolate(&entry.message, &params);
                resolve(
                    self.translator.as_deref(),
                    &locale,
                    entry.i18n_key.as_deref(),
                    &params,
                    &fallback,
                )
            }
            None => resolve(
                self.translator.as_deref(),
                &locale,
                issue.i18n_key.as_deref(),
                &issue.i18n_params,
                &issue.message,
            ),
        }
    }

    /// Every error entry, in registration order.
    pub fn error_messages(&self) -> Vec<ErrorMessage> {
        self.state.read().errors.values().cloned().collect()
    }

    /// Every help entry, in registration order.
    pub fn help_messages(&self) -> Vec<HelpMessage> {
        self.state.read().help.values().cloned().collect()
    }

    fn localize_error(&self, message: &mut ErrorMessage, locale: &str) {
        message.display = self.translator.as_deref().map(|translator| {
            resolve(
                Some(translator),
                locale,
                message.i18n_key.as_deref(),
                &message.i18n_params,
                &message.message,
            )
        });
    }

    fn localize_help(&self, message: &mut HelpMessage, locale: &str) {
        message.display = self.translator.as_deref().map(|translator| {
            resolve(
                Some(translator),
                locale,
                message.i18n_key.as_deref(),
                &message.i18n_params,
                &message.content,
            )
        });
    }

    fn relocalize(&self) {
        let mut state = self.state.write();
        let locale = state.locale.clone();
        for message in state.errors.values_mut() {
            self.localize_error(message, &locale);
        }
        for message in state.help.values_mut() {
            self.localize_help(message, &locale);
        }
        state.invalidate();
        self.publish_auto_show(&state);
    }

    fn publish_auto_show(&self, state: &State) {
        let visible: Vec<HelpMessage> = state.help.values().filter(|h| h.auto_show).cloned().collect();
        self.auto_show.send_replace(Arc::new(visible));
    }

    fn spawn_load(&self, kind: LoadKind, key: &str) {
        let Some(loader) = self.loader.clone() else {
            return;
        };
        let Ok(handle) = Handle::try_current() else {
            tracing::trace!(key, "no tokio runtime; skipping lazy load");
            return;
        };
        let ticket = format!("{}:{}", kind.as_str(), key);
        if !self.state.write().loading.insert(ticket.clone()) {
            return;
        }

        let catalog = self.clone();
        let key = key.to_string();
        handle.spawn(async move {
            let loaded = match kind {
                LoadKind::Error => loader.load_error(&key).await.map(|m| m.map(Loaded::Error)),
                LoadKind::Help => loader.load_help(&key).await.map(|m| m.map(Loaded::Help)),
            };
            match loaded {
                Ok(Some(Loaded::Error(message))) => catalog.add_error_message(message),
                Ok(Some(Loaded::Help(message))) => catalog.add_help_message(message),
                Ok(None) => tracing::trace!(key = %key, "loader has no entry"),
                Err(error) => tracing::warn!(key = %key, %error, "lazy load failed"),
            }
            catalog.state.write().loading.remove(&ticket);
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum LoadKind {
    Error,
    Help,
}

impl LoadKind {
    fn as_str(self) -> &'static str {
        match self {
            LoadKind::Error => "error",
            LoadKind::Help => "help",
        }
    }
}

enum Loaded {
    Error(ErrorMessage),
    Help(HelpMessage),
}

fn collect_for_field<'a, T, I, F>(entries: I, field: &str, field_of: F) -> Vec<T>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a T>,
    F: Fn(&T) -> &Option<String>,
{
    entries
        .filter(|entry| field_of(entry).as_deref() == Some(field))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticTranslator;

    fn catalog() -> MessageCatalog {
        MessageCatalog::new(CatalogOptions::default())
    }

    #[test]
    fn test_replace_keeps_position() {
        let catalog = catalog();
        catalog.add_error_messages([
            ErrorMessage::new("A", "a").for_field("f"),
            ErrorMessage::new("B", "b").for_field("f"),
        ]);
        catalog.add_error_message(ErrorMessage::new("A", "a2").for_field("f"));

        let list = catalog.errors_for_field("f");
        assert_eq!(list[0].message, "a2");
        assert_eq!(list[1].code, "B");
    }

    #[test]
    fn test_add_invalidates_field_cache() {
        let catalog = catalog();
        catalog.add_error_message(ErrorMessage::new("A", "a").for_field("f"));
        let before = catalog.errors_for_field("f");

        catalog.add_error_message(ErrorMessage::new("B", "b").for_field("f"));
        let after = catalog.errors_for_field("f");

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_uncached_returns_fresh_lists() {
        let catalog = MessageCatalog::new(CatalogOptions::default().with_cache(false));
        catalog.add_help_message(HelpMessage::new("h", "t", "c").for_field("f"));

        let first = catalog.help_for_field("f");
        let second = catalog.help_for_field("f");
        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_translation_and_fallback() {
        let translator = StaticTranslator::new().with("en", "errors.name", "Please enter your name");
        let catalog = catalog().with_translator(translator);
        catalog.add_error_messages([
            ErrorMessage::new("missing_name", "Name is required").with_i18n("errors.name"),
            ErrorMessage::new("missing_email", "Email is required").with_i18n("errors.email"),
        ]);

        assert_eq!(
            catalog.get_error_message("missing_name").unwrap().text(),
            "Please enter your name"
        );
        assert_eq!(
            catalog.get_error_message("missing_email").unwrap().text(),
            "Email is required"
        );
    }

    #[test]
    fn test_unknown_locale_falls_back_to_literal() {
        let translator = StaticTranslator::new().with("en", "k", "English");
        let catalog = MessageCatalog::new(CatalogOptions::default().with_locale("de"))
            .with_translator(translator);
        catalog.add_error_message(ErrorMessage::new("c", "literal").with_i18n("k"));
        assert_eq!(catalog.get_error_message("c").unwrap().text(), "literal");
    }

    #[test]
    fn test_missing_without_loader_is_none() {
        assert!(catalog().get_error_message("nope").is_none());
        assert!(catalog().get_help_message("nope").is_none());
    }

    #[test]
    fn test_message_for_issue_prefers_catalog_entry() {
        let catalog = catalog();
        catalog.add_error_message(ErrorMessage::new("too_long", "Keep it under {max} characters"));

        let issue = ValidationError::new("too_long", "Must be at most 100 characters").with_param("max", 100);
        assert_eq!(catalog.message_for_issue(&issue), "Keep it under 100 characters");

        let other = ValidationError::new("too_short", "Must be at least 2 characters");
        assert_eq!(catalog.message_for_issue(&other), "Must be at least 2 characters");
    }
}
