//! The validation message catalog.
//!
//! Maps error codes and help ids to display text, indexed by field, with
//! optional translation and background loading of missing entries.

mod loader;
mod message;
mod options;
mod store;
mod translate;

pub use loader::{LoadError, MessageLoader};
pub use message::{ErrorMessage, HelpMessage};
pub use options::CatalogOptions;
pub use store::MessageCatalog;
pub use translate::{interpolate, StaticTranslator, TranslateError, Translator};
