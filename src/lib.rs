//! # Vitae
//!
//! A validation engine for resume data that reports ALL problems at once,
//! graded by severity and addressed by field path, instead of stopping at
//! the first one.
//!
//! ## Overview
//!
//! Raw, partially filled resume JSON goes in; either a validated [`resume::Resume`]
//! or a structured list of [`ValidationError`]s comes out. Errors block
//! validity; warnings are advisory and ride along with a successful value.
//! Schema checks accumulate through stillwater's `Validation` type.
//!
//! ## Core Types
//!
//! - [`Outcome`]: success (with optional warnings) or a non-empty list of errors
//! - [`ValidationError`]: one problem with code, message, field path, severity and layer
//! - [`FieldPath`]: dotted paths such as `basics.email` or `work[2].startDate`
//! - [`Schema`]: entry point for structural schemas
//! - [`form::FormValidator`]: per-field and whole-form validation with dirty tracking
//! - [`catalog::MessageCatalog`]: code to display text, with i18n and lazy loading
//! - [`service::ResumeService`]: create/update/import/export use cases
//!
//! ## Example
//!
//! ```rust
//! use vitae::resume::work_schema;
//! use vitae::FieldPath;
//! use serde_json::json;
//!
//! let result = work_schema().validate(
//!     &json!({"name": "Acme Inc", "position": "Developer", "startDate": "01-01-2020"}),
//!     &FieldPath::root(),
//! );
//!
//! let errors = result.into_result().unwrap_err();
//! assert_eq!(errors.first().message, "Date must be in YYYY-MM-DD format");
//! assert_eq!(errors.first().field.as_deref(), Some("startDate"));
//! ```

pub mod catalog;
pub mod error;
pub mod form;
pub mod outcome;
pub mod path;
pub mod resume;
pub mod schema;
pub mod service;

pub use error::{codes, Layer, Severity, ValidationError, ValidationErrors};
pub use outcome::{combine_validation_results, Outcome, OutcomeError};
pub use path::{FieldPath, FieldPathError, PathSegment};
pub use schema::{ArraySchema, ObjectSchema, Schema, SchemaLike, StringSchema, ValueValidator};

/// Accumulating result used inside schemas.
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;
