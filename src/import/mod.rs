//! Import functionality
//!
//! Loads craft batch documents and checks their shape:
//! - Batch discovery (`batch-*.json` files in a directory, sorted by name)
//! - Batch parsing (JSON array of craft entries with nested artisans)

pub mod batch;
pub mod discover;

use std::path::PathBuf;

/// Error during import
///
/// Any import error aborts the run before output is produced.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// A document or entry is missing a required field or has the wrong shape
    #[error("Schema error in {document} at {field}: {message}")]
    SchemaError {
        /// Source document identity
        document: String,
        /// Path of the offending field within the document, e.g. `[0].artisans[2].name`
        field: String,
        message: String,
    },
    /// A source could not be read
    #[error("IO error reading {}: {message}", path.display())]
    IoError { path: PathBuf, message: String },
}

impl ImportError {
    pub(crate) fn schema(
        document: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ImportError::SchemaError {
            document: document.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        ImportError::IoError {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

// Re-export for convenience
pub use batch::BatchImporter;
pub use discover::{compile_pattern, discover_batches};
