//! Resume use cases over an externally implemented repository.
//!
//! This is the outer seam: failures come back as [`ServiceError`] values
//! with descriptive messages instead of validation outcomes.

mod error;
mod export;
mod repository;
mod resume_service;

pub use error::ServiceError;
pub use export::{render, render_markdown};
pub use repository::{
    ExportFormat, ExportedFile, ImportFile, RepositoryError, ResumeRepository, UnknownFormat,
};
pub use resume_service::{merge_patch, ResumeService};
