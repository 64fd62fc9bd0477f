//! Business rules layered over the section schemas.
//!
//! Two kinds of rule live here. Required rules re-check presence with
//! user-facing wording ("Company name is required") and are graded as
//! application-layer errors. Advisories are heuristics (vague job titles,
//! filler skills, future start dates) that only ever produce warnings.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value;

use crate::codes;
use crate::error::{Layer, ValidationError};
use crate::path::FieldPath;
use crate::schema::{check_date, is_blank};

const VAGUE_POSITIONS: &[&str] = &[
    "employee",
    "worker",
    "staff",
    "member",
    "team member",
    "associate",
    "various",
    "misc",
    "n/a",
    "none",
];

const GENERIC_SKILLS: &[&str] = &[
    "communication",
    "teamwork",
    "team player",
    "hard working",
    "hardworking",
    "hard worker",
    "detail oriented",
    "problem solving",
    "microsoft office",
    "computers",
];

/// Summaries shorter than this many characters draw a warning.
pub const MIN_SUMMARY_CHARS: usize = 30;

/// A presence rule with business wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRule {
    /// Code reported when the field is blank.
    pub code: &'static str,
    /// Message reported when the field is blank.
    pub message: &'static str,
}

/// A heuristic over a non-blank string value. Returns a warning or nothing.
type Advisory = Box<dyn Fn(&str, &FieldPath) -> Option<ValidationError> + Send + Sync>;

/// The business rule table for one resume section.
///
/// Keyed by top-level field name, so the rules that apply to a field can be
/// enumerated without inspecting data.
///
/// # Example
///
/// ```rust
/// use vitae::resume::BusinessRules;
/// use vitae::FieldPath;
/// use serde_json::json;
///
/// let rules = BusinessRules::work();
/// let issues = rules.check_field("name", &json!({"name": ""}), &FieldPath::root());
/// assert_eq!(issues[0].message, "Company name is required");
/// ```
#[derive(Default)]
pub struct BusinessRules {
    required: IndexMap<&'static str, RequiredRule>,
    advisories: IndexMap<&'static str, Vec<Advisory>>,
}

impl BusinessRules {
    /// Creates an empty rule table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required rule for `field`.
    pub fn require(mut self, field: &'static str, code: &'static str, message: &'static str) -> Self {
        self.required.insert(field, RequiredRule { code, message });
        self
    }

    /// Adds an advisory heuristic for `field`.
    pub fn advise<F>(mut self, field: &'static str, check: F) -> Self
    where
        F: Fn(&str, &FieldPath) -> Option<ValidationError> + Send + Sync + 'static,
    {
        self.advisories.entry(field).or_default().push(Box::new(check));
        self
    }

    /// Rules for the `basics` section.
    pub fn basics() -> Self {
        Self::new()
            .require("name", codes::resume::basics::MISSING_NAME, "Name is required")
            .require("email", codes::resume::basics::MISSING_EMAIL, "Email is required")
            .advise("summary", short_summary)
    }

    /// Rules for a `work` entry, judging future dates against the local clock.
    pub fn work() -> Self {
        Self::work_as_of(chrono::Local::now().date_naive())
    }

    /// Rules for a `work` entry, judging future dates against `today`.
    pub fn work_as_of(today: NaiveDate) -> Self {
        Self::new()
            .require("name", codes::resume::work::MISSING_COMPANY, "Company name is required")
            .require("position", codes::resume::work::MISSING_POSITION, "Position is required")
            .advise("position", vague_position)
            .advise("startDate", move |value, path| future_date(value, path, today))
    }

    /// Rules for an `education` entry.
    pub fn education() -> Self {
        Self::new().require(
            "institution",
            codes::resume::education::MISSING_INSTITUTION,
            "Institution is required",
        )
    }

    /// Rules for a `skills` entry.
    pub fn skill() -> Self {
        Self::new()
            .require("name", codes::resume::skills::MISSING_SKILL_NAME, "Skill name is required")
            .advise("name", generic_skill)
    }

    /// Rules for a `projects` entry.
    pub fn project() -> Self {
        Self::new().require(
            "name",
            codes::resume::projects::MISSING_PROJECT_NAME,
            "Project name is required",
        )
    }

    /// Returns the required rule for `field`, if there is one.
    pub fn required_rule(&self, field: &str) -> Option<&RequiredRule> {
        self.required.get(field)
    }

    /// Returns every field that has at least one rule, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        let extra = self
            .advisories
            .keys()
            .filter(|f| !self.required.contains_key(*f));
        self.required.keys().chain(extra).copied()
    }

    /// Runs the required rule for `field` alone.
    pub fn check_required(&self, field: &str, data: &Value, path: &FieldPath) -> Option<ValidationError> {
        let rule = self.required.get(field)?;
        let blank = data.get(field).map_or(true, is_blank);
        blank.then(|| {
            ValidationError::new(rule.code, rule.message)
                .with_field(path.push_field(field))
                .with_layer(Layer::Application)
                .with_i18n(format!("errors.{}", rule.code))
        })
    }

    /// Runs the advisories for `field`. Blank and non-string values are skipped.
    pub fn check_advisories(&self, field: &str, data: &Value, path: &FieldPath) -> Vec<ValidationError> {
        let value = match data.get(field).and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => s.trim(),
            _ => return Vec::new(),
        };
        let field_path = path.push_field(field);
        self.advisories
            .get(field)
            .into_iter()
            .flatten()
            .filter_map(|check| check(value, &field_path))
            .collect()
    }

    /// Runs every rule for `field`.
    ///
    /// A failed required rule is reported alone; advisories only run on a
    /// present value.
    pub fn check_field(&self, field: &str, data: &Value, path: &FieldPath) -> Vec<ValidationError> {
        match self.check_required(field, data, path) {
            Some(error) => vec![error],
            None => self.check_advisories(field, data, path),
        }
    }

    /// Runs every rule in the table, field by field.
    pub fn check(&self, data: &Value, path: &FieldPath) -> Vec<ValidationError> {
        self.fields()
            .flat_map(|field| self.check_field(field, data, path))
            .collect()
    }
}

fn advisory(code: &str, message: impl Into<String>, path: &FieldPath) -> ValidationError {
    ValidationError::warning(code, message)
        .with_field(path.clone())
        .with_layer(Layer::Application)
        .with_i18n(format!("warnings.{}", code))
}

fn vague_position(value: &str, path: &FieldPath) -> Option<ValidationError> {
    let lower = value.to_lowercase();
    VAGUE_POSITIONS.contains(&lower.as_str()).then(|| {
        advisory(
            codes::resume::work::VAGUE_POSITION,
            "Position title is too vague; name the actual role",
            path,
        )
        .with_param("position", value)
    })
}

fn generic_skill(value: &str, path: &FieldPath) -> Option<ValidationError> {
    let lower = value.to_lowercase();
    GENERIC_SKILLS.contains(&lower.as_str()).then(|| {
        advisory(
            codes::resume::skills::GENERIC_SKILL,
            format!("'{}' is a generic skill; prefer something concrete and verifiable", value),
            path,
        )
        .with_param("skill", value)
    })
}

fn short_summary(value: &str, path: &FieldPath) -> Option<ValidationError> {
    let len = value.chars().count();
    (len < MIN_SUMMARY_CHARS).then(|| {
        advisory(
            codes::resume::basics::SHORT_SUMMARY,
            format!("Summary is very short; aim for at least {} characters", MIN_SUMMARY_CHARS),
            path,
        )
        .with_param("min", MIN_SUMMARY_CHARS)
        .with_param("actual", len)
    })
}

// Malformed dates are the schema's concern.
fn future_date(value: &str, path: &FieldPath, today: NaiveDate) -> Option<ValidationError> {
    let date = check_date(value).ok()?;
    (date > today).then(|| {
        advisory(codes::date::FUTURE, "Start date is in the future", path)
            .with_param("date", date.to_string())
            .with_param("today", today.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_required_rule_uses_business_wording() {
        let rules = BusinessRules::basics();
        let issues = rules.check_field("name", &json!({"name": "  "}), &FieldPath::from_field("basics"));

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, codes::resume::basics::MISSING_NAME);
        assert_eq!(issues[0].message, "Name is required");
        assert_eq!(issues[0].layer, Layer::Application);
        assert_eq!(issues[0].field.as_deref(), Some("basics.name"));
    }

    #[test]
    fn test_missing_key_counts_as_blank() {
        let rules = BusinessRules::work_as_of(today());
        let issues = rules.check(&json!({}), &FieldPath::root());
        let codes: Vec<_> = issues.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![codes::resume::work::MISSING_COMPANY, codes::resume::work::MISSING_POSITION]
        );
    }

    #[test]
    fn test_vague_position_is_a_warning() {
        let rules = BusinessRules::work_as_of(today());
        let issues = rules.check_field("position", &json!({"position": "Employee"}), &FieldPath::root());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].code, codes::resume::work::VAGUE_POSITION);
    }

    #[test]
    fn test_future_start_date() {
        let rules = BusinessRules::work_as_of(today());

        let issues = rules.check_field("startDate", &json!({"startDate": "2030-01-01"}), &FieldPath::root());
        assert_eq!(issues[0].code, codes::date::FUTURE);

        let issues = rules.check_field("startDate", &json!({"startDate": "2024-06-01"}), &FieldPath::root());
        assert!(issues.is_empty());

        let issues = rules.check_field("startDate", &json!({"startDate": "not a date"}), &FieldPath::root());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_generic_skill_case_insensitive() {
        let rules = BusinessRules::skill();
        let issues = rules.check_field("name", &json!({"name": "TeamWork"}), &FieldPath::root());
        assert_eq!(issues[0].code, codes::resume::skills::GENERIC_SKILL);
        assert_eq!(issues[0].i18n_params.get("skill"), Some(&json!("TeamWork")));

        assert!(rules.check_field("name", &json!({"name": "Rust"}), &FieldPath::root()).is_empty());
    }

    #[test]
    fn test_short_summary() {
        let rules = BusinessRules::basics();
        let data = json!({"name": "Jane", "email": "jane@example.com", "summary": "Engineer."});
        let issues = rules.check(&data, &FieldPath::root());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, codes::resume::basics::SHORT_SUMMARY);
    }

    #[test]
    fn test_fields_enumerates_table() {
        let rules = BusinessRules::work_as_of(today());
        assert_eq!(rules.fields().collect::<Vec<_>>(), vec!["name", "position", "startDate"]);
    }
}
