//! Deferred field validation.
//!
//! Each call to [`DebouncedForm::validate_field`] marks the field dirty at
//! once and schedules the real validation after the configured delay. A
//! later call for the same field supersedes the earlier one: only the most
//! recent input is ever evaluated. Between the call and the delay elapsing,
//! [`DebouncedForm::is_pending`] reports the field as pending and its error
//! entries still reflect the previous validation.

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;

use super::options::FormOptions;
use super::validator::FormValidator;

#[derive(Default)]
struct Pending {
    next_ticket: u64,
    fields: IndexMap<String, (u64, Value)>,
}

/// A [`FormValidator`] whose field validation is deferred.
///
/// Cloning yields another handle to the same form.
#[derive(Clone)]
pub struct DebouncedForm {
    form: Arc<Mutex<FormValidator>>,
    pending: Arc<Mutex<Pending>>,
    delay: Duration,
}

impl DebouncedForm {
    /// Wraps `form`, deferring field validation by `options.debounce_ms`.
    pub fn new(form: FormValidator, options: FormOptions) -> Self {
        Self {
            form: Arc::new(Mutex::new(form)),
            pending: Arc::new(Mutex::new(Pending::default())),
            delay: options.debounce(),
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Marks `field` dirty now and validates `data` after the delay.
    ///
    /// With a zero delay, or when called outside a tokio runtime, the field
    /// is validated before this returns.
    pub fn validate_field(&self, data: Value, field: &str) {
        self.form.lock().mark_dirty(field);

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) if !self.delay.is_zero() => handle,
            Ok(_) => {
                self.validate_now(&data, field);
                return;
            }
            Err(_) => {
                tracing::warn!(field, "no tokio runtime; validating without debounce");
                self.validate_now(&data, field);
                return;
            }
        };

        let ticket = {
            let mut pending = self.pending.lock();
            pending.next_ticket += 1;
            let ticket = pending.next_ticket;
            if pending
                .fields
                .insert(field.to_string(), (ticket, data))
                .is_some()
            {
                tracing::trace!(field, ticket, "superseded pending validation");
            }
            ticket
        };

        let form = Arc::clone(&self.form);
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        let field = field.to_string();
        handle.spawn(async move {
            tokio::time::sleep(delay).await;

            let mut pending = pending.lock();
            if pending.fields.get(&field).map(|(t, _)| *t) != Some(ticket) {
                return;
            }
            if let Some((_, data)) = pending.fields.shift_remove(&field) {
                form.lock().validate_field(&data, &field);
            }
        });
    }

    fn validate_now(&self, data: &Value, field: &str) {
        self.pending.lock().fields.shift_remove(field);
        self.form.lock().validate_field(data, field);
    }

    /// Runs every pending validation now instead of waiting for its delay.
    pub fn flush(&self) {
        let mut pending = self.pending.lock();
        let mut form = self.form.lock();
        for (field, (_, data)) in pending.fields.drain(..) {
            form.validate_field(&data, &field);
        }
    }

    /// Validates the whole form immediately, dropping pending field
    /// validations.
    pub fn validate_form(&self, data: &Value) -> bool {
        self.pending.lock().fields.clear();
        self.form.lock().validate_form(data)
    }

    /// True while a validation for `field` is scheduled but has not run.
    pub fn is_pending(&self, field: &str) -> bool {
        self.pending.lock().fields.contains_key(field)
    }

    /// True while any field has a scheduled validation.
    pub fn has_pending(&self) -> bool {
        !self.pending.lock().fields.is_empty()
    }

    /// See [`FormValidator::is_dirty`]. Flips as soon as a field is submitted.
    pub fn is_dirty(&self, field: &str) -> bool {
        self.form.lock().is_dirty(field)
    }

    /// True when no error is recorded. Pending fields are not counted.
    pub fn is_valid(&self) -> bool {
        self.form.lock().is_valid()
    }

    /// The recorded error at `field`, as of the last completed validation.
    pub fn error(&self, field: &str) -> Option<String> {
        self.form.lock().error(field).map(str::to_string)
    }

    /// The recorded warning at `field`.
    pub fn warning(&self, field: &str) -> Option<String> {
        self.form.lock().warning(field).map(str::to_string)
    }

    /// Cancels pending validations and clears all form state.
    pub fn reset(&self) {
        self.pending.lock().fields.clear();
        self.form.lock().reset();
    }

    /// Runs `f` against the underlying form.
    pub fn with_form<R>(&self, f: impl FnOnce(&FormValidator) -> R) -> R {
        f(&self.form.lock())
    }
}
