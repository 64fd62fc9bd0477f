//! The resume domain: section schemas, business rules and the validated
//! [`Resume`] aggregate.

mod model;
mod rules;
mod schema;
mod validator;

pub use model::{
    Basics, Education, Location, Profile, Project, Resume, ResumeCreation, ResumeId, Skill, Work,
};
pub use rules::{BusinessRules, RequiredRule, MIN_SUMMARY_CHARS};
pub use schema::{
    basics_schema, education_schema, location_schema, profile_schema, project_schema,
    resume_schema, skill_schema, work_schema,
};
pub use validator::SectionValidator;
