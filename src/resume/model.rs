//! The validated resume aggregate.
//!
//! A [`Resume`] can only be obtained through [`Resume::create`] or
//! [`Resume::parse`], both of which run the full resume schema first. Section
//! types are plain serde records and can be built freely; only the aggregate
//! carries the "has been validated" guarantee.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::codes;
use crate::error::{ValidationError, ValidationErrors};
use crate::outcome::Outcome;
use crate::path::FieldPath;

use super::schema::resume_schema;

/// Identifier assigned to a resume when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeId(Uuid);

impl ResumeId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ResumeId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ResumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ResumeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A social profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A postal location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Who the candidate is and how to reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basics {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<Profile>>,
}

/// One position held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub name: String,
    pub position: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

/// One course of study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<String>>,
}

/// One skill area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

/// One project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResumeData {
    basics: Basics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    work: Option<Vec<Work>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    education: Option<Vec<Education>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    skills: Option<Vec<Skill>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    projects: Option<Vec<Project>>,
}

/// A schema-valid resume.
#[derive(Debug, Clone, PartialEq)]
pub struct Resume {
    id: ResumeId,
    data: ResumeData,
}

/// Result of [`Resume::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeCreation {
    /// True exactly when `resume` is present.
    pub is_valid: bool,
    /// The resume, when the input was fully valid.
    pub resume: Option<Resume>,
    /// One message per failing rule, in emission order. Empty when valid.
    pub errors: Vec<String>,
}

impl Resume {
    /// Validates `raw` and builds a resume with a fresh id.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vitae::resume::Resume;
    /// use serde_json::json;
    ///
    /// let created = Resume::create(&json!({
    ///     "basics": {"name": "Jane Doe", "email": "jane@example.com"},
    ///     "work": [{"name": "Acme", "position": "Engineer", "startDate": "2020-01-01", "endDate": "2019-01-01"}]
    /// }));
    ///
    /// assert!(!created.is_valid);
    /// assert_eq!(created.errors, vec!["End date must be after or equal to start date"]);
    /// ```
    pub fn create(raw: &Value) -> ResumeCreation {
        match Self::parse(raw) {
            Ok(resume) => ResumeCreation {
                is_valid: true,
                resume: Some(resume),
                errors: Vec::new(),
            },
            Err(errors) => ResumeCreation {
                is_valid: false,
                resume: None,
                errors: errors.messages(),
            },
        }
    }

    /// Validates `raw` and builds a resume with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns every schema violation found in `raw`.
    pub fn parse(raw: &Value) -> Result<Self, ValidationErrors> {
        Self::parse_with_id(ResumeId::new(), raw)
    }

    /// Validates `raw` and builds a resume that keeps `id`.
    ///
    /// # Errors
    ///
    /// Returns every schema violation found in `raw`.
    pub fn parse_with_id(id: ResumeId, raw: &Value) -> Result<Self, ValidationErrors> {
        Self::validate(raw).into_result().and_then(|data| {
            let data = serde_json::from_value(Value::Object(data)).map_err(|e| {
                ValidationErrors::single(
                    ValidationError::new(codes::shape::INVALID_TYPE, e.to_string())
                        .with_field(FieldPath::root()),
                )
            })?;
            Ok(Self { id, data })
        })
    }

    /// Runs the full resume schema over `raw`.
    pub fn validate(raw: &Value) -> Outcome<serde_json::Map<String, Value>> {
        resume_schema().validate(raw, &FieldPath::root()).into()
    }

    /// The identifier assigned at creation.
    pub fn id(&self) -> ResumeId {
        self.id
    }

    /// Contact and headline details.
    pub fn basics(&self) -> &Basics {
        &self.data.basics
    }

    /// Work history; empty when the section is absent.
    pub fn work(&self) -> &[Work] {
        self.data.work.as_deref().unwrap_or_default()
    }

    /// Education entries; empty when absent.
    pub fn education(&self) -> &[Education] {
        self.data.education.as_deref().unwrap_or_default()
    }

    /// Skill entries; empty when absent.
    pub fn skills(&self) -> &[Skill] {
        self.data.skills.as_deref().unwrap_or_default()
    }

    /// Project entries; empty when absent.
    pub fn projects(&self) -> &[Project] {
        self.data.projects.as_deref().unwrap_or_default()
    }

    /// Serializes the resume content (without its id) back to JSON.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.data).unwrap_or(Value::Null)
    }
}
