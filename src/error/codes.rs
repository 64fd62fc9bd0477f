//! Stable error and warning codes.
//!
//! Codes are grouped by area and are the wire format between layers: catalogs
//! look messages up by code and UIs key inline feedback on it. A code is never
//! reused for a different meaning; a new rule gets a new code.
//!
//! Section modules under [`resume`] re-export the generic codes that apply to
//! them, so `codes::resume::work::END_BEFORE_START` and
//! `codes::date::END_BEFORE_START` are the same identifier.

/// Shape-level codes shared by every schema.
pub mod shape {
    /// A required value is missing or blank.
    pub const REQUIRED_FIELD: &str = "required_field";
    /// The value has the wrong JSON type.
    pub const INVALID_TYPE: &str = "invalid_type";
    /// A strictly-shaped object carries a key it does not declare.
    pub const UNKNOWN_FIELD: &str = "unknown_field";
    /// A string or list is shorter than allowed.
    pub const TOO_SHORT: &str = "too_short";
    /// A string or list is longer than allowed.
    pub const TOO_LONG: &str = "too_long";
    /// A string does not match a declared pattern.
    pub const INVALID_FORMAT: &str = "invalid_format";
}

/// Calendar date codes.
pub mod date {
    /// Not in `YYYY-MM-DD` shape.
    pub const INVALID_FORMAT: &str = "invalid_date_format";
    /// Right shape, but not a real calendar date.
    pub const INVALID_VALUE: &str = "invalid_date";
    /// A date lies after today.
    pub const FUTURE: &str = "future_date";
    /// `endDate` precedes `startDate`.
    pub const END_BEFORE_START: &str = "end_before_start";
}

/// URL codes.
pub mod url {
    /// Not parseable as an absolute URL.
    pub const INVALID: &str = "invalid_url";
    /// Parseable, but the scheme is not http or https.
    pub const INVALID_SCHEME: &str = "invalid_url_scheme";
}

/// Email codes.
pub mod email {
    /// Not shaped like `local@domain.tld`.
    pub const INVALID: &str = "invalid_email";
}

/// Codes specific to resume sections.
pub mod resume {
    /// The `basics` section.
    pub mod basics {
        /// Business rule: the candidate name is empty.
        pub const MISSING_NAME: &str = "missing_name";
        /// Business rule: the contact email is empty.
        pub const MISSING_EMAIL: &str = "missing_email";
        /// Warning: the summary is too brief to be useful.
        pub const SHORT_SUMMARY: &str = "short_summary";
        pub use super::super::email::INVALID as INVALID_EMAIL;
        pub use super::super::url::{INVALID as INVALID_URL, INVALID_SCHEME as INVALID_URL_SCHEME};
    }

    /// The `work` section.
    pub mod work {
        /// Business rule: the employer name is empty.
        pub const MISSING_COMPANY: &str = "missing_company";
        /// Business rule: the job title is empty.
        pub const MISSING_POSITION: &str = "missing_position";
        /// Warning: the job title is too generic to tell a reader anything.
        pub const VAGUE_POSITION: &str = "vague_position";
        pub use super::super::date::{END_BEFORE_START, FUTURE as FUTURE_START};
    }

    /// The `education` section.
    pub mod education {
        /// Business rule: the institution name is empty.
        pub const MISSING_INSTITUTION: &str = "missing_institution";
        pub use super::super::date::END_BEFORE_START;
    }

    /// The `skills` section.
    pub mod skills {
        /// Business rule: the skill name is empty.
        pub const MISSING_SKILL_NAME: &str = "missing_skill_name";
        /// Warning: the skill is a filler soft skill.
        pub const GENERIC_SKILL: &str = "generic_skill";
    }

    /// The `projects` section.
    pub mod projects {
        /// Business rule: the project name is empty.
        pub const MISSING_PROJECT_NAME: &str = "missing_project_name";
        pub use super::super::date::END_BEFORE_START;
    }
}

/// Every distinct code, in table order.
pub const ALL: &[&str] = &[
    shape::REQUIRED_FIELD,
    shape::INVALID_TYPE,
    shape::UNKNOWN_FIELD,
    shape::TOO_SHORT,
    shape::TOO_LONG,
    shape::INVALID_FORMAT,
    date::INVALID_FORMAT,
    date::INVALID_VALUE,
    date::FUTURE,
    date::END_BEFORE_START,
    url::INVALID,
    url::INVALID_SCHEME,
    email::INVALID,
    resume::basics::MISSING_NAME,
    resume::basics::MISSING_EMAIL,
    resume::basics::SHORT_SUMMARY,
    resume::work::MISSING_COMPANY,
    resume::work::MISSING_POSITION,
    resume::work::VAGUE_POSITION,
    resume::education::MISSING_INSTITUTION,
    resume::skills::MISSING_SKILL_NAME,
    resume::skills::GENERIC_SKILL,
    resume::projects::MISSING_PROJECT_NAME,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_distinct() {
        let unique: HashSet<_> = ALL.iter().collect();
        assert_eq!(unique.len(), ALL.len());
    }

    #[test]
    fn test_codes_are_snake_case() {
        for code in ALL {
            assert!(
                code.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "code '{}' is not snake_case",
                code
            );
        }
    }

    #[test]
    fn test_section_aliases_share_identifiers() {
        assert_eq!(resume::work::END_BEFORE_START, "end_before_start");
        assert_eq!(resume::education::END_BEFORE_START, date::END_BEFORE_START);
        assert_eq!(resume::basics::INVALID_URL_SCHEME, url::INVALID_SCHEME);
    }
}
