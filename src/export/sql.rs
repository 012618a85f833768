//! SQL bulk-load exporter
//!
//! Produces a script that clears the target table and re-inserts every row:
//!
//! ```sql
//! -- Artisan records bulk load (generated)
//! -- Clears existing rows before re-inserting
//! DELETE FROM artisans;
//!
//! INSERT INTO artisans (id, name, craft_id, generation, biography, philosophy, quote, workshop_name) VALUES
//! ('…', 'Kenji', 'c1', null, null, null, 'It''s fine', null);
//! ```
//!
//! Rows are grouped into chunks of at most [`MAX_CHUNK_SIZE`] rows, one
//! self-contained INSERT statement per chunk.

use super::{ExportError, ExportResult};
use crate::models::SqlRow;
use crate::validation::input::validate_table_name;
use tracing::info;

/// Default target table
pub const DEFAULT_TABLE: &str = "artisans";

/// Target columns, in insertion order
pub const ARTISAN_COLUMNS: [&str; 8] = [
    "id",
    "name",
    "craft_id",
    "generation",
    "biography",
    "philosophy",
    "quote",
    "workshop_name",
];

/// Rows per INSERT statement unless configured otherwise
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Upper bound on rows per INSERT statement
pub const MAX_CHUNK_SIZE: usize = 50;

/// SQL null keyword as emitted
pub const SQL_NULL: &str = "null";

/// Escape a string for use inside a single-quoted SQL literal
///
/// Each `'` is doubled; nothing else changes.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render a value that is never null as a quoted literal
pub fn render_required(value: &str) -> String {
    format!("'{}'", escape_literal(value))
}

/// Render an optional value; absent or empty values become `null`
pub fn render_nullable(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => render_required(v),
        _ => SQL_NULL.to_string(),
    }
}

/// The fixed table contract rows are written against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    name: String,
}

impl TargetTable {
    /// Target a table by name; the name must be a plain SQL identifier
    pub fn new(name: impl Into<String>) -> Result<Self, ExportError> {
        let name = name.into();
        validate_table_name(&name)
            .map_err(|e| ExportError::ValidationError(format!("Invalid target table: {}", e)))?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &ARTISAN_COLUMNS
    }

    /// Parenthesised column list, e.g. `(id, name, ...)`
    pub fn column_list(&self) -> String {
        format!("({})", ARTISAN_COLUMNS.join(", "))
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self {
            name: DEFAULT_TABLE.to_string(),
        }
    }
}

/// Exporter for the paginated SQL script
#[derive(Debug, Clone)]
pub struct SQLExporter {
    table: TargetTable,
    chunk_size: usize,
}

impl Default for SQLExporter {
    fn default() -> Self {
        Self {
            table: TargetTable::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SQLExporter {
    pub fn new(table: TargetTable, chunk_size: usize) -> Result<Self, ExportError> {
        validate_chunk_size(chunk_size)?;
        Ok(Self { table, chunk_size })
    }

    pub fn table(&self) -> &TargetTable {
        &self.table
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of INSERT statements `row_count` rows produce
    pub fn statement_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.chunk_size)
    }

    /// Comment header and the full-table delete
    pub fn preamble(&self) -> String {
        format!(
            "-- Artisan records bulk load (generated)\n\
             -- Clears existing rows before re-inserting\n\
             DELETE FROM {};\n\n",
            self.table.name()
        )
    }

    /// Render one row as a parenthesised value tuple
    pub fn render_row(row: &SqlRow) -> String {
        let mut values = vec![
            render_required(&row.id.to_string()),
            render_required(&row.name),
            render_required(&row.craft_id),
        ];
        values.extend(row.nullable_values().into_iter().map(render_nullable));
        format!("({})", values.join(", "))
    }

    /// Render a single INSERT statement for a chunk of rows
    pub fn insert_statement(&self, rows: &[SqlRow]) -> String {
        let tuples: Vec<String> = rows.iter().map(Self::render_row).collect();
        format!(
            "INSERT INTO {} {} VALUES\n{};\n\n",
            self.table.name(),
            self.table.column_list(),
            tuples.join(",\n")
        )
    }

    /// Export all rows as one script, preserving row order
    ///
    /// # Example
    ///
    /// ```rust
    /// use artisan_merge::export::SQLExporter;
    ///
    /// let result = SQLExporter::default().export(&[]);
    /// assert!(result.content.contains("DELETE FROM artisans;"));
    /// assert!(!result.content.contains("INSERT"));
    /// ```
    pub fn export(&self, rows: &[SqlRow]) -> ExportResult {
        let mut content = self.preamble();
        for chunk in rows.chunks(self.chunk_size) {
            content.push_str(&self.insert_statement(chunk));
        }

        info!(
            "Rendered {} rows into {} INSERT statements for table {}",
            rows.len(),
            self.statement_count(rows.len()),
            self.table.name()
        );

        ExportResult {
            content,
            format: "sql".to_string(),
        }
    }
}

/// Chunk sizes must be in `1..=MAX_CHUNK_SIZE`
pub fn validate_chunk_size(chunk_size: usize) -> Result<(), ExportError> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(ExportError::ValidationError(format!(
            "chunk size must be between 1 and {}, got {}",
            MAX_CHUNK_SIZE, chunk_size
        )));
    }
    Ok(())
}
