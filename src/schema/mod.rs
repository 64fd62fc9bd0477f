//! Schema definitions for structural validation.
//!
//! Schemas check the shape of raw JSON input: required fields, string
//! formats, list lengths and cross-field rules such as date ordering. Every
//! schema accumulates all issues rather than stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use vitae::{FieldPath, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("name", Schema::string())
//!     .field("startDate", Schema::string().date())
//!     .optional("endDate", Schema::string().date())
//!     .date_range("startDate", "endDate");
//!
//! let result = schema.validate(
//!     &json!({"name": "Acme", "startDate": "2020-01-01", "endDate": "2019-12-31"}),
//!     &FieldPath::root(),
//! );
//! assert!(result.is_failure());
//! ```

mod array;
mod format;
mod object;
mod string;
mod traits;

pub use array::ArraySchema;
pub use format::{
    check_date, check_email, check_url, Format, DATE_FORMAT_MESSAGE, DATE_VALUE_MESSAGE,
    EMAIL_MESSAGE, END_BEFORE_START_MESSAGE, URL_FORMAT_MESSAGE, URL_SCHEME_MESSAGE,
};
pub use object::ObjectSchema;
pub use string::{StringSchema, REQUIRED_MESSAGE};
pub use traits::{SchemaLike, ValueValidator};

pub(crate) use object::is_blank;
pub(crate) use traits::value_type_name;

use stillwater::Validation;

use crate::error::{ValidationError, ValidationErrors};

/// Entry point for creating validation schemas.
pub struct Schema;

impl Schema {
    /// Creates a new string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a new object schema.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates a new array schema over `item_schema`.
    pub fn array<S: SchemaLike>(item_schema: S) -> ArraySchema<S> {
        ArraySchema::new(item_schema)
    }
}

/// Finishes an accumulating check: success with `value` if no issue was found.
pub(crate) fn collect<T>(value: T, errors: Vec<ValidationError>) -> Validation<T, ValidationErrors> {
    match ValidationErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(value),
    }
}
