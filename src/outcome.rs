//! The validation outcome algebra.
//!
//! [`Outcome`] is the value every validator returns: either a usable value
//! (optionally carrying advisory warnings) or a non-empty list of errors.
//! All operations here are pure value transformations.

use indexmap::IndexMap;
use std::hash::Hash;
use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{Severity, ValidationError, ValidationErrors};

/// Success or failure of a validation.
///
/// Exactly one variant is active. `warnings` on a success and the errors on a
/// failure are never empty when present; a success with warnings is still
/// valid data.
///
/// # Example
///
/// ```rust
/// use vitae::{Outcome, ValidationError};
///
/// let ok = Outcome::success(2).map(|n| n * 10);
/// assert_eq!(ok.value(), Some(&20));
///
/// let failed: Outcome<i32> =
///     Outcome::failure(vec![ValidationError::new("required_field", "required")]).unwrap();
/// assert!(failed.map(|n| n * 10).is_failure());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The value passed; warnings are advisory.
    ///
    /// Every entry in `warnings` must have [`Severity::Warning`]. Build this
    /// variant through [`Outcome::success_with_warnings`] or
    /// [`Outcome::from_parts`], which enforce that; an outcome assembled by
    /// hand can be checked with [`Outcome::verify`].
    Success {
        /// The validated value.
        value: T,
        /// Advisory issues, all with [`Severity::Warning`].
        warnings: Option<ValidationErrors>,
    },
    /// The value did not pass. Every entry should have [`Severity::Error`].
    Failure(ValidationErrors),
}

/// Precondition violations when building an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutcomeError {
    /// A warning-carrying success was built with no warnings.
    #[error("a success with warnings needs at least one warning")]
    EmptyWarnings,

    /// A warning-carrying success was given an issue graded as an error.
    #[error("issue '{0}' has error severity and cannot be attached as a warning")]
    NotAWarning(String),

    /// A failure carries an issue graded as a warning.
    #[error("issue '{0}' has warning severity and cannot fail an outcome")]
    NotAnError(String),

    /// A failure was built with no errors.
    #[error("a failure needs at least one error")]
    EmptyFailure,
}

impl<T> Outcome<T> {
    /// Creates a clean success.
    pub fn success(value: T) -> Self {
        Outcome::Success {
            value,
            warnings: None,
        }
    }

    /// Creates a success that carries advisory warnings.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::EmptyWarnings`] for an empty list and
    /// [`OutcomeError::NotAWarning`] if any entry has error severity.
    pub fn success_with_warnings(
        value: T,
        warnings: Vec<ValidationError>,
    ) -> Result<Self, OutcomeError> {
        if let Some(error) = warnings.iter().find(|w| w.severity != Severity::Warning) {
            return Err(OutcomeError::NotAWarning(error.code.clone()));
        }
        let warnings = ValidationErrors::from_vec(warnings).ok_or(OutcomeError::EmptyWarnings)?;
        Ok(Outcome::Success {
            value,
            warnings: Some(warnings),
        })
    }

    /// Creates a failure from a list of errors.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::EmptyFailure`] for an empty list.
    pub fn failure(errors: Vec<ValidationError>) -> Result<Self, OutcomeError> {
        ValidationErrors::from_vec(errors)
            .map(Outcome::Failure)
            .ok_or(OutcomeError::EmptyFailure)
    }

    /// Builds an outcome from a value and a mixed list of issues.
    ///
    /// Any error-severity issue makes the outcome a failure carrying only the
    /// errors; otherwise the warnings (if any) ride along with the value.
    pub fn from_parts(value: T, issues: Vec<ValidationError>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = issues.into_iter().partition(|i| i.is_error());
        match ValidationErrors::from_vec(errors) {
            Some(errors) => Outcome::Failure(errors),
            None => Outcome::Success {
                value,
                warnings: ValidationErrors::from_vec(warnings),
            },
        }
    }

    /// Checks the severity invariants the constructors enforce.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::NotAWarning`] for an error-severity entry
    /// among a success's warnings, and [`OutcomeError::NotAnError`] for a
    /// warning among a failure's errors.
    pub fn verify(&self) -> Result<(), OutcomeError> {
        match self {
            Outcome::Success { .. } => match self.warnings().into_iter().find(|w| w.is_error()) {
                Some(issue) => Err(OutcomeError::NotAWarning(issue.code.clone())),
                None => Ok(()),
            },
            Outcome::Failure(errors) => match errors.iter().find(|e| e.is_warning()) {
                Some(issue) => Err(OutcomeError::NotAnError(issue.code.clone())),
                None => Ok(()),
            },
        }
    }

    /// Returns true for a success, with or without warnings.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Returns true for a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Returns the value of a success.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Returns the errors of a failure, or an empty slice-like vec for a success.
    pub fn errors(&self) -> Vec<&ValidationError> {
        match self {
            Outcome::Success { .. } => Vec::new(),
            Outcome::Failure(errors) => errors.iter().collect(),
        }
    }

    /// Returns the warnings of a success.
    pub fn warnings(&self) -> Vec<&ValidationError> {
        match self {
            Outcome::Success {
                warnings: Some(warnings),
                ..
            } => warnings.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Returns every issue this outcome carries, errors and warnings alike.
    pub fn issues(&self) -> Vec<&ValidationError> {
        match self {
            Outcome::Success { .. } => self.warnings(),
            Outcome::Failure(errors) => errors.iter().collect(),
        }
    }

    /// Returns the errors attached to `field`; empty for a success.
    pub fn errors_for_field(&self, field: &str) -> Vec<&ValidationError> {
        match self {
            Outcome::Success { .. } => Vec::new(),
            Outcome::Failure(errors) => errors.for_field(field),
        }
    }

    /// Transforms the value of a success; failures pass through untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success { value, warnings } => Outcome::Success {
                value: f(value),
                warnings,
            },
            Outcome::Failure(errors) => Outcome::Failure(errors),
        }
    }

    /// Chains a dependent validation that only runs on success.
    ///
    /// Warnings from both steps are kept, earlier ones first.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Success { value, warnings } => match f(value) {
                Outcome::Success {
                    value,
                    warnings: next,
                } => Outcome::Success {
                    value,
                    warnings: combine_optional(warnings, next),
                },
                Outcome::Failure(errors) => Outcome::Failure(errors),
            },
            Outcome::Failure(errors) => Outcome::Failure(errors),
        }
    }

    /// Converts into a std `Result`, dropping warnings.
    pub fn into_result(self) -> Result<T, ValidationErrors> {
        match self {
            Outcome::Success { value, .. } => Ok(value),
            Outcome::Failure(errors) => Err(errors),
        }
    }
}

impl<T> From<Validation<T, ValidationErrors>> for Outcome<T> {
    /// Maps an accumulated schema validation onto an outcome without warnings.
    fn from(validation: Validation<T, ValidationErrors>) -> Self {
        match validation {
            Validation::Success(value) => Outcome::success(value),
            Validation::Failure(errors) => Outcome::Failure(errors),
        }
    }
}

fn combine_optional(
    first: Option<ValidationErrors>,
    second: Option<ValidationErrors>,
) -> Option<ValidationErrors> {
    match (first, second) {
        (Some(a), Some(b)) => Some(a.combine(b)),
        (a, b) => a.or(b),
    }
}

/// Combines keyed outcomes into one outcome over the keyed values.
///
/// Succeeds only if every entry succeeds. On failure the errors of **all**
/// failing entries are concatenated in key order, so the error count equals
/// the sum over failing inputs. Warnings of successful entries are kept on
/// an overall success.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexMap;
/// use vitae::{combine_validation_results, Outcome, ValidationError};
///
/// let mut results = IndexMap::new();
/// results.insert("a", Outcome::success(1));
/// results.insert("b", Outcome::failure(vec![ValidationError::new("e1", "first")]).unwrap());
/// results.insert("c", Outcome::failure(vec![ValidationError::new("e2", "second")]).unwrap());
///
/// let combined = combine_validation_results(results);
/// let codes: Vec<_> = combined.errors().iter().map(|e| e.code.clone()).collect();
/// assert_eq!(codes, vec!["e1", "e2"]);
/// ```
pub fn combine_validation_results<K, T>(results: IndexMap<K, Outcome<T>>) -> Outcome<IndexMap<K, T>>
where
    K: Hash + Eq,
{
    let mut values = IndexMap::with_capacity(results.len());
    let mut errors: Option<ValidationErrors> = None;
    let mut warnings: Option<ValidationErrors> = None;

    for (key, outcome) in results {
        match outcome {
            Outcome::Success {
                value,
                warnings: entry_warnings,
            } => {
                values.insert(key, value);
                warnings = combine_optional(warnings, entry_warnings);
            }
            Outcome::Failure(entry_errors) => {
                errors = combine_optional(errors, Some(entry_errors));
            }
        }
    }

    match errors {
        Some(errors) => Outcome::Failure(errors),
        None => Outcome::Success {
            value: values,
            warnings,
        },
    }
}
