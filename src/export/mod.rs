//! Export functionality
//!
//! Provides emitters for the merged data:
//! - Lookup document (JSON keyed by craft name)
//! - SQL bulk-load script (delete preamble plus paginated INSERT statements)
//!
//! Rendering is done entirely in memory; [`writer`] persists the results.

pub mod lookup;
pub mod sql;
pub mod writer;

use std::path::PathBuf;

/// Result of an export operation.
///
/// Contains the exported content and format identifier.
#[derive(Debug, Clone, serde::Serialize)]
#[must_use = "export results contain the exported content and should be used"]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("IO error writing {}: {message}", path.display())]
    IoError { path: PathBuf, message: String },
}

// Re-export for convenience
pub use lookup::LookupExporter;
pub use sql::{SQLExporter, TargetTable};
pub use writer::{write_artifacts, write_atomic};
