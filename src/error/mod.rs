//! Error and warning types produced by validation.
//!
//! This module provides the [`ValidationError`] issue type with its
//! [`Severity`] and originating [`Layer`], the non-empty [`ValidationErrors`]
//! collection, and the stable code table in [`codes`].

pub mod codes;
mod issue;

pub use issue::{Layer, Severity, ValidationError, ValidationErrors};
