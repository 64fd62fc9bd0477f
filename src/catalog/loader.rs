//! On-demand loading of catalog entries.

use async_trait::async_trait;
use thiserror::Error;

use super::message::{ErrorMessage, HelpMessage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("message source unavailable: {0}")]
    Unavailable(String),

    #[error("malformed entry '{id}': {reason}")]
    Malformed { id: String, reason: String },
}

/// Fetches entries the catalog does not hold yet.
///
/// The catalog calls these in the background when a lookup misses. The
/// missing lookup itself still returns nothing; a loaded entry only serves
/// later lookups.
#[async_trait]
pub trait MessageLoader: Send + Sync {
    async fn load_error(&self, code: &str) -> Result<Option<ErrorMessage>, LoadError>;

    async fn load_help(&self, id: &str) -> Result<Option<HelpMessage>, LoadError>;
}
