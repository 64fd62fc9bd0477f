//! Schema plus business rules for one resume section.
//!
//! [`SectionValidator`] is what a form validates against. Per field it runs
//! the business required rule first and, only if that passes, the schema
//! check for that field followed by advisories. Whole-object validation runs
//! the same checks over every field, so it never reports less than the
//! per-field checks do on the same data.
//!
//! For presence the business rule is canonical: where a field has one, its
//! error replaces the schema's generic `required_field` error at that path.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::codes;
use crate::error::ValidationError;
use crate::outcome::Outcome;
use crate::path::FieldPath;
use crate::schema::ObjectSchema;

use super::rules::BusinessRules;
use super::schema::{basics_schema, education_schema, project_schema, skill_schema, work_schema};

/// A section schema paired with its business rule table.
pub struct SectionValidator {
    name: &'static str,
    schema: ObjectSchema,
    rules: BusinessRules,
}

impl SectionValidator {
    /// Creates a validator from parts.
    pub fn new(name: &'static str, schema: ObjectSchema, rules: BusinessRules) -> Self {
        Self {
            name,
            schema,
            rules,
        }
    }

    /// The `basics` section: name and email required.
    pub fn basics() -> Self {
        Self::new("basics", basics_schema(), BusinessRules::basics())
    }

    /// A `work` validator that judges future dates against the local date.
    pub fn work() -> Self {
        Self::new("work", work_schema(), BusinessRules::work())
    }

    /// A `work` validator that judges future dates against `today`.
    pub fn work_as_of(today: NaiveDate) -> Self {
        Self::new("work", work_schema(), BusinessRules::work_as_of(today))
    }

    /// The `education` section: institution required.
    pub fn education() -> Self {
        Self::new("education", education_schema(), BusinessRules::education())
    }

    /// One `skills` entry: name required, generic skills warned.
    pub fn skill() -> Self {
        Self::new("skills", skill_schema(), BusinessRules::skill())
    }

    /// One `projects` entry: name required.
    pub fn project() -> Self {
        Self::new("projects", project_schema(), BusinessRules::project())
    }

    /// Section name, used in log fields.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The structural schema.
    pub fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    /// The business rule table.
    pub fn rules(&self) -> &BusinessRules {
        &self.rules
    }

    /// Declared field names in schema order.
    pub fn field_names(&self) -> Vec<&str> {
        self.schema.field_names().collect()
    }

    /// Returns true if `field` is declared optional and no business rule
    /// requires it. Undeclared fields are not optional.
    pub fn is_optional(&self, field: &str) -> bool {
        self.schema.is_optional(field) == Some(true) && self.rules.required_rule(field).is_none()
    }

    /// Validates one top-level field of `data`.
    ///
    /// Errors for the field (and anything nested under it) make a failure;
    /// advisories ride along as warnings on a success.
    pub fn validate_field(&self, data: &Value, field: &str) -> Outcome<Value> {
        let root = FieldPath::root();

        if let Some(error) = self.rules.check_required(field, data, &root) {
            return Outcome::Failure(error.into());
        }

        match self.schema.validate_field(field, data, &root) {
            None => Outcome::Failure(unknown_field(field).into()),
            Some(Validation::Failure(errors)) => Outcome::Failure(errors),
            Some(Validation::Success(value)) => {
                Outcome::from_parts(value, self.rules.check_advisories(field, data, &root))
            }
        }
    }

    /// Validates the whole section object.
    pub fn validate(&self, data: &Value) -> Outcome<Map<String, Value>> {
        self.report(data).0
    }

    /// Validates the whole section object and also returns every issue
    /// found, errors and warnings together in emission order.
    ///
    /// A failing [`Outcome`] keeps only the errors; forms use the full list
    /// to show advisories next to errors.
    pub fn report(&self, data: &Value) -> (Outcome<Map<String, Value>>, Vec<ValidationError>) {
        let root = FieldPath::root();

        let mut required: IndexMap<String, ValidationError> = self
            .rules
            .fields()
            .filter_map(|field| self.rules.check_required(field, data, &root))
            .filter_map(|error| error.field.clone().map(|field| (field, error)))
            .collect();

        let (value, schema_errors) = match self.schema.validate(data, &root) {
            Validation::Success(value) => (value, Vec::new()),
            Validation::Failure(errors) => (Map::new(), errors.into_vec()),
        };

        let mut issues: Vec<ValidationError> = schema_errors
            .into_iter()
            .map(|error| {
                let replacement = (error.code == codes::shape::REQUIRED_FIELD)
                    .then(|| error.field.as_deref().and_then(|f| required.shift_remove(f)))
                    .flatten();
                replacement.unwrap_or(error)
            })
            .collect();
        issues.extend(required.into_values());

        let advisories: Vec<ValidationError> = self
            .rules
            .fields()
            .filter(|field| !issues.iter().any(|issue| issue.is_within(field)))
            .flat_map(|field| self.rules.check_advisories(field, data, &root))
            .collect();
        issues.extend(advisories);

        (Outcome::from_parts(value, issues.clone()), issues)
    }
}

fn unknown_field(field: &str) -> ValidationError {
    ValidationError::new(codes::shape::UNKNOWN_FIELD, format!("Unknown field '{}'", field))
        .with_field(FieldPath::from_field(field))
        .with_param("field", field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_business_required_replaces_schema_required() {
        let validator = SectionValidator::work_as_of(today());
        let outcome = validator.validate(&json!({"name": "", "startDate": "2020-01-01"}));

        let codes: Vec<_> = outcome.errors().iter().map(|e| e.code.clone()).collect();
        assert_eq!(
            codes,
            vec![codes::resume::work::MISSING_COMPANY, codes::resume::work::MISSING_POSITION]
        );
    }

    #[test]
    fn test_field_required_short_circuits_schema() {
        let validator = SectionValidator::basics();
        let outcome = validator.validate_field(&json!({"email": ""}), "email");

        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].message, "Email is required");
    }

    #[test]
    fn test_field_format_error() {
        let validator = SectionValidator::basics();
        let outcome = validator.validate_field(&json!({"email": "jane@"}), "email");
        assert_eq!(outcome.errors()[0].code, codes::email::INVALID);
    }

    #[test]
    fn test_advisory_only_when_field_passes() {
        let validator = SectionValidator::work_as_of(today());

        let outcome = validator.validate_field(&json!({"position": "Staff"}), "position");
        assert!(outcome.is_success());
        assert_eq!(outcome.warnings()[0].code, codes::resume::work::VAGUE_POSITION);

        let long = "Staff".repeat(30);
        let outcome = validator.validate_field(&json!({"position": long}), "position");
        assert!(outcome.is_failure());
        assert!(outcome.warnings().is_empty());
    }

    #[test]
    fn test_unknown_field_name() {
        let validator = SectionValidator::skill();
        let outcome = validator.validate_field(&json!({}), "salary");
        assert_eq!(outcome.errors()[0].code, codes::shape::UNKNOWN_FIELD);
    }

    #[test]
    fn test_whole_object_keeps_warnings_on_success() {
        let validator = SectionValidator::work_as_of(today());
        let outcome = validator.validate(&json!({
            "name": "Acme",
            "position": "Employee",
            "startDate": "2025-01-01"
        }));

        assert!(outcome.is_success());
        let codes: Vec<_> = outcome.warnings().iter().map(|w| w.code.clone()).collect();
        assert_eq!(codes, vec![codes::resume::work::VAGUE_POSITION, codes::date::FUTURE]);
    }

    #[test]
    fn test_report_keeps_warnings_beside_errors() {
        let validator = SectionValidator::work_as_of(today());
        let (outcome, issues) = validator.report(&json!({
            "name": "",
            "position": "Employee",
            "startDate": "2025-01-01"
        }));

        assert!(outcome.is_failure());
        assert!(outcome.warnings().is_empty());
        let codes: Vec<_> = issues.iter().map(|i| i.code.clone()).collect();
        assert_eq!(
            codes,
            vec![
                codes::resume::work::MISSING_COMPANY,
                codes::resume::work::VAGUE_POSITION,
                codes::date::FUTURE
            ]
        );
    }

    #[test]
    fn test_is_optional() {
        let validator = SectionValidator::work_as_of(today());
        assert!(validator.is_optional("url"));
        assert!(!validator.is_optional("name"));
        assert!(!validator.is_optional("salary"));
    }
}
