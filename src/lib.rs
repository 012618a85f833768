//! Artisan merge - consolidates partitioned craft/artisan batch documents
//!
//! Provides:
//! - Batch discovery and loading with shape validation
//! - Merging into a craft-name keyed lookup with generated row identifiers
//! - Emission of the lookup document and a paginated SQL bulk-load script
//! - Configuration (`.artisan-merge.toml` plus environment overrides)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod export;
pub mod import;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod validation;

pub use config::{ConfigError, MergeConfig};
pub use export::{ExportError, ExportResult, LookupExporter, SQLExporter, TargetTable};
pub use import::{BatchImporter, ImportError};
pub use merge::{IdGenerator, MergeResult, Merger, RandomIdGenerator, merge_batches};
pub use models::{ArtisanRecord, CraftBatch, CraftEntry, MergedLookup, SqlRow};
pub use pipeline::{MergeStats, RenderedArtifacts, RunError, RunReport, run, transform};
