//! Resume use cases.

use serde_json::Value;

use crate::resume::{Resume, ResumeId};
use crate::schema::value_type_name;

use super::error::ServiceError;
use super::repository::{ExportFormat, ExportedFile, ImportFile, ResumeRepository};

/// Create, update, import and export resumes over a repository.
///
/// Every write validates the complete resume; nothing invalid reaches the
/// repository.
pub struct ResumeService<R> {
    repository: R,
}

impl<R: ResumeRepository> ResumeService<R> {
    /// Creates a service over `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates `data` as a new resume and saves it.
    pub async fn create_resume(&self, data: &Value) -> Result<Resume, ServiceError> {
        let resume = Resume::parse(data).map_err(|errors| {
            tracing::debug!(issues = errors.len(), "rejected new resume");
            ServiceError::Invalid(errors)
        })?;
        self.repository.save(&resume).await?;
        tracing::info!(id = %resume.id(), "created resume");
        Ok(resume)
    }

    pub async fn get_resume(&self, id: ResumeId) -> Result<Resume, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Merges `patch` over the stored resume and re-validates the result as
    /// a whole before saving.
    ///
    /// The merge follows JSON merge patch: objects merge key by key, `null`
    /// removes a key, anything else (arrays included) replaces.
    pub async fn update_resume(&self, id: ResumeId, patch: &Value) -> Result<Resume, ServiceError> {
        if !patch.is_object() {
            return Err(ServiceError::InvalidPatch(value_type_name(patch)));
        }
        let existing = self.get_resume(id).await?;

        let mut merged = existing.to_json();
        merge_patch(&mut merged, patch);

        let resume = Resume::parse_with_id(id, &merged).map_err(|errors| {
            tracing::debug!(id = %id, issues = errors.len(), "rejected resume update");
            ServiceError::Invalid(errors)
        })?;
        self.repository.save(&resume).await?;
        tracing::info!(id = %id, "updated resume");
        Ok(resume)
    }

    /// Reads `file` through the repository and creates a resume from it.
    pub async fn import_resume(&self, file: &ImportFile) -> Result<Resume, ServiceError> {
        let raw = self.repository.import(file).await?;
        tracing::debug!(file = %file.file_name, "imported raw resume");
        self.create_resume(&raw).await
    }

    pub async fn export_resume(&self, id: ResumeId, format: ExportFormat) -> Result<ExportedFile, ServiceError> {
        let resume = self.get_resume(id).await?;
        let file = self.repository.export(&resume, format).await?;
        tracing::info!(id = %id, %format, "exported resume");
        Ok(file)
    }
}

/// Applies a JSON merge patch to `target` in place.
pub fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(serde_json::Map::new());
    }
    if let Value::Object(target) = target {
        for (key, value) in patch {
            if value.is_null() {
                target.remove(key);
            } else {
                merge_patch(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_patch_nested() {
        let mut doc = json!({
            "basics": {"name": "Jane", "email": "jane@example.com", "label": "Dev"},
            "skills": [{"name": "Rust"}]
        });
        merge_patch(
            &mut doc,
            &json!({"basics": {"label": null, "phone": "555-0100"}, "skills": []}),
        );
        assert_eq!(
            doc,
            json!({
                "basics": {"name": "Jane", "email": "jane@example.com", "phone": "555-0100"},
                "skills": []
            })
        );
    }

    #[test]
    fn test_merge_patch_replaces_scalar_with_object() {
        let mut doc = json!({"a": 1});
        merge_patch(&mut doc, &json!({"a": {"b": 2}}));
        assert_eq!(doc, json!({"a": {"b": 2}}));
    }
}
