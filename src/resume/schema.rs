//! Section schemas for resume data.
//!
//! Each function returns a fresh closed-world [`ObjectSchema`]; unknown keys
//! are errors. Field names follow the camelCase JSON resume layout.

use crate::schema::{ObjectSchema, Schema, StringSchema};

const PHONE_PATTERN: &str = r"^\+?[0-9 ().-]{5,25}$";

fn text(max: usize) -> StringSchema {
    Schema::string().max_len(max)
}

fn phone() -> StringSchema {
    match Schema::string().pattern(PHONE_PATTERN) {
        Ok(schema) => schema.error("Phone number may only contain digits, spaces and ( ) . - +"),
        Err(_) => Schema::string(),
    }
}

/// A social profile inside `basics.profiles`.
pub fn profile_schema() -> ObjectSchema {
    Schema::object()
        .field("network", text(50))
        .optional("username", text(100))
        .optional("url", Schema::string().url())
        .additional_properties(false)
}

/// A postal location inside `basics.location`.
pub fn location_schema() -> ObjectSchema {
    Schema::object()
        .optional("address", text(200))
        .optional("postalCode", text(20))
        .optional("city", text(100))
        .optional("countryCode", Schema::string().min_len(2).max_len(2))
        .optional("region", text(100))
        .additional_properties(false)
}

/// The `basics` section: who the candidate is and how to reach them.
pub fn basics_schema() -> ObjectSchema {
    Schema::object()
        .field("name", Schema::string().required().max_len(100))
        .field("email", Schema::string().required().email())
        .optional("label", text(100))
        .optional("phone", phone())
        .optional("url", Schema::string().url())
        .optional("image", Schema::string().url())
        .optional("summary", text(2000))
        .optional("location", location_schema())
        .optional("profiles", Schema::array(profile_schema()))
        .additional_properties(false)
}

/// One `work` entry.
pub fn work_schema() -> ObjectSchema {
    Schema::object()
        .field("name", Schema::string().required().max_len(100))
        .field("position", Schema::string().required().max_len(100))
        .field("startDate", Schema::string().date())
        .optional("endDate", Schema::string().date())
        .optional("url", Schema::string().url())
        .optional("location", text(100))
        .optional("summary", text(2000))
        .optional("highlights", Schema::array(Schema::string().required().max_len(500)))
        .additional_properties(false)
        .date_range("startDate", "endDate")
}

/// One `education` entry.
pub fn education_schema() -> ObjectSchema {
    Schema::object()
        .field("institution", Schema::string().required().max_len(100))
        .optional("area", text(100))
        .optional("studyType", text(100))
        .optional("startDate", Schema::string().date())
        .optional("endDate", Schema::string().date())
        .optional("score", text(20))
        .optional("url", Schema::string().url())
        .optional("courses", Schema::array(Schema::string().required().max_len(200)))
        .additional_properties(false)
        .date_range("startDate", "endDate")
}

/// One `skills` entry.
pub fn skill_schema() -> ObjectSchema {
    Schema::object()
        .field("name", Schema::string().required().max_len(50))
        .optional("level", text(50))
        .optional("keywords", Schema::array(Schema::string().required().max_len(50)).max_len(20))
        .additional_properties(false)
}

/// One `projects` entry.
pub fn project_schema() -> ObjectSchema {
    Schema::object()
        .field("name", Schema::string().required().max_len(100))
        .optional("description", text(2000))
        .optional("url", Schema::string().url())
        .optional("startDate", Schema::string().date())
        .optional("endDate", Schema::string().date())
        .optional("highlights", Schema::array(Schema::string().required().max_len(500)))
        .additional_properties(false)
        .date_range("startDate", "endDate")
}

/// The whole resume aggregate.
pub fn resume_schema() -> ObjectSchema {
    Schema::object()
        .field("basics", basics_schema())
        .optional("work", Schema::array(work_schema()))
        .optional("education", Schema::array(education_schema()))
        .optional("skills", Schema::array(skill_schema()))
        .optional("projects", Schema::array(project_schema()))
        .additional_properties(false)
}
