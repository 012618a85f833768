//! Load, merge and emit in one run
//!
//! [`transform`] is the pure core: batches in, rendered artifacts out.
//! [`run`] wraps it with discovery, file loading and atomic writes. Nothing is
//! written unless every batch loads and both artifacts render.

use crate::config::{ConfigError, MergeConfig};
use crate::export::sql::TargetTable;
use crate::export::{ExportError, LookupExporter, SQLExporter, write_artifacts};
use crate::import::{BatchImporter, ImportError, discover_batches};
use crate::merge::{IdGenerator, merge_batches};
use crate::models::CraftBatch;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Any failure that aborts a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Both artifacts, rendered and ready to write
#[derive(Debug, Clone)]
#[must_use = "rendered artifacts should be written or inspected"]
pub struct RenderedArtifacts {
    pub lookup_document: String,
    pub sql_document: String,
    pub stats: MergeStats,
}

/// Counters describing a merge; observational only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Batches processed
    pub batches: usize,
    /// Craft entries processed, including repeated craft names
    pub crafts_processed: usize,
    /// SQL rows produced (one per artisan in every processed entry)
    pub artisan_rows: usize,
    /// Distinct craft names in the lookup document
    pub lookup_crafts: usize,
    /// Entries that replaced an earlier entry with the same craft name
    pub overwritten_crafts: usize,
    /// INSERT statements in the SQL document
    pub insert_statements: usize,
}

/// End-of-run summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    #[serde(flatten)]
    pub stats: MergeStats,
    pub lookup_path: PathBuf,
    pub sql_path: PathBuf,
}

/// Merge batches and render both artifacts in memory
pub fn transform<G: IdGenerator>(
    batches: Vec<CraftBatch>,
    sql_exporter: &SQLExporter,
    id_generator: G,
) -> Result<RenderedArtifacts, RunError> {
    let batch_count = batches.len();
    let merged = merge_batches(batches, id_generator);

    let lookup = LookupExporter::export(&merged.lookup)?;
    let sql = sql_exporter.export(&merged.rows);

    let stats = MergeStats {
        batches: batch_count,
        crafts_processed: merged.crafts_processed,
        artisan_rows: merged.artisan_rows(),
        lookup_crafts: merged.lookup.len(),
        overwritten_crafts: merged.overwritten_crafts,
        insert_statements: sql_exporter.statement_count(merged.artisan_rows()),
    };

    Ok(RenderedArtifacts {
        lookup_document: lookup.content,
        sql_document: sql.content,
        stats,
    })
}

/// Run the full merge for a project root
pub fn run<G: IdGenerator>(
    config: &MergeConfig,
    root: &Path,
    id_generator: G,
) -> Result<RunReport, RunError> {
    config.validate()?;
    let pattern = config.batch_pattern()?;

    let table = TargetTable::new(&config.sql.table)?;
    let sql_exporter = SQLExporter::new(table, config.sql.chunk_size)?;

    let sources = discover_batches(&config.batch_dir(root), &pattern)?;
    let batches = BatchImporter::new().import_all(&sources)?;

    let artifacts = transform(batches, &sql_exporter, id_generator)?;

    let lookup_path = config.lookup_path(root);
    let sql_path = config.sql_path(root);
    write_artifacts(&[
        (lookup_path.as_path(), artifacts.lookup_document.as_str()),
        (sql_path.as_path(), artifacts.sql_document.as_str()),
    ])?;

    let stats = artifacts.stats;
    info!(
        "JSON: {} crafts, {} artisans -> {}",
        stats.crafts_processed,
        stats.artisan_rows,
        lookup_path.display()
    );
    info!(
        "SQL: {} rows in {} statements -> {}",
        stats.artisan_rows,
        stats.insert_statements,
        sql_path.display()
    );

    Ok(RunReport {
        stats,
        lookup_path,
        sql_path,
    })
}
