//! Form-facing validation: per-field and whole-form checks with dirty
//! tracking, plus a debounced variant for validate-as-you-type.
//!
//! A field moves from pristine to dirty on its first validation and stays
//! dirty until the form is reset.

mod debounce;
mod options;
mod state;
mod validator;

pub use debounce::DebouncedForm;
pub use options::FormOptions;
pub use state::ValidationState;
pub use validator::FormValidator;
