//! The storage contract the service depends on.

use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::resume::{Resume, ResumeId};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),

    #[error("unsupported import file '{0}'")]
    UnsupportedImport(String),

    #[error("could not read import file '{file}': {source}")]
    MalformedImport {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not render export: {0}")]
    Export(#[from] serde_json::Error),
}

/// Output format for [`ResumeRepository::export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }

    /// MIME type of the rendered file.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Markdown => "text/markdown",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format '{0}'; expected json or markdown")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// A file handed in for import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    pub file_name: String,
    pub contents: String,
}

impl ImportFile {
    /// Wraps an uploaded file.
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    /// Parses the file as raw resume JSON. Only `.json` files are accepted.
    pub fn to_value(&self) -> Result<Value, RepositoryError> {
        let is_json = Path::new(&self.file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(RepositoryError::UnsupportedImport(self.file_name.clone()));
        }
        serde_json::from_str(&self.contents).map_err(|source| RepositoryError::MalformedImport {
            file: self.file_name.clone(),
            source,
        })
    }
}

/// A rendered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub format: ExportFormat,
    pub file_name: String,
    pub contents: String,
}

impl ExportedFile {
    /// MIME type of the contents.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Persistence for resumes, implemented outside this crate.
///
/// Every method may fail; the service wraps failures in
/// [`super::ServiceError::Repository`].
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn save(&self, resume: &Resume) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: ResumeId) -> Result<Option<Resume>, RepositoryError>;

    /// Reads raw resume data out of an uploaded file. The service validates
    /// what comes back.
    async fn import(&self, file: &ImportFile) -> Result<Value, RepositoryError>;

    async fn export(&self, resume: &Resume, format: ExportFormat) -> Result<ExportedFile, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_parse() {
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("md".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_import_rejects_other_extensions() {
        let file = ImportFile::new("resume.pdf", "%PDF");
        assert!(matches!(file.to_value(), Err(RepositoryError::UnsupportedImport(_))));
    }

    #[test]
    fn test_import_reports_bad_json() {
        let file = ImportFile::new("resume.JSON", "{not json");
        assert!(matches!(file.to_value(), Err(RepositoryError::MalformedImport { .. })));
    }
}
