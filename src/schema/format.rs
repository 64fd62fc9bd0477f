//! Well-known string formats: ISO dates, web URLs and email addresses.
//!
//! Each check reports the first failing step only; a single field never
//! produces two format errors.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::codes;
use crate::error::ValidationError;
use crate::path::FieldPath;

/// Message for a date that is not shaped `YYYY-MM-DD`.
pub const DATE_FORMAT_MESSAGE: &str = "Date must be in YYYY-MM-DD format";
/// Message for a well-shaped date that is not on the calendar.
pub const DATE_VALUE_MESSAGE: &str = "Invalid date value";
/// Message for an unparseable URL.
pub const URL_FORMAT_MESSAGE: &str = "Invalid URL format";
/// Message for a URL with a scheme other than http(s).
pub const URL_SCHEME_MESSAGE: &str = "URL must start with http:// or https://";
/// Message for a malformed email address.
pub const EMAIL_MESSAGE: &str = "Invalid email format";
/// Message for an end date that precedes its start date.
pub const END_BEFORE_START_MESSAGE: &str = "End date must be after or equal to start date";

// ASCII classes only: `\d` would admit non-ASCII digits.
static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("valid email regex")
});

/// A string format a [`StringSchema`](super::StringSchema) can enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Calendar date `YYYY-MM-DD`.
    Date,
    /// Absolute `http`/`https` URL.
    Url,
    /// Email address.
    Email,
}

impl Format {
    /// Checks `value`, returning the most specific error for the first failing step.
    pub fn check(self, value: &str, path: &FieldPath) -> Option<ValidationError> {
        let result = match self {
            Format::Date => check_date(value).map(|_| ()),
            Format::Url => check_url(value),
            Format::Email => check_email(value),
        };
        result.err().map(|error| error.with_field(path.clone()))
    }
}

/// Parses an ISO calendar date, distinguishing shape errors from impossible dates.
///
/// ```rust
/// use vitae::schema::check_date;
///
/// assert!(check_date("2020-02-29").is_ok());
/// assert_eq!(check_date("01-01-2020").unwrap_err().code, "invalid_date_format");
/// assert_eq!(check_date("2020-13-01").unwrap_err().code, "invalid_date");
/// ```
pub fn check_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_REGEX.is_match(value) {
        return Err(
            ValidationError::new(codes::date::INVALID_FORMAT, DATE_FORMAT_MESSAGE)
                .with_i18n("validation.date.format")
                .with_param("value", value),
        );
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ValidationError::new(codes::date::INVALID_VALUE, DATE_VALUE_MESSAGE)
            .with_i18n("validation.date.value")
            .with_param("value", value)
    })
}

/// Checks that `value` is an absolute URL with an http or https scheme.
pub fn check_url(value: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(value).map_err(|_| {
        ValidationError::new(codes::url::INVALID, URL_FORMAT_MESSAGE)
            .with_i18n("validation.url.format")
            .with_param("value", value)
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(
            ValidationError::new(codes::url::INVALID_SCHEME, URL_SCHEME_MESSAGE)
                .with_i18n("validation.url.scheme")
                .with_param("scheme", scheme),
        ),
    }
}

/// Checks that `value` is shaped like an email address.
pub fn check_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(codes::email::INVALID, EMAIL_MESSAGE)
            .with_i18n("validation.email.format"))
    }
}
