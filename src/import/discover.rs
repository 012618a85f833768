//! Batch source discovery
//!
//! Batches are the regular files in one directory whose names match a glob
//! pattern (`*`, `?` and `[...]` classes). They are returned in lexicographic
//! file-name order, which is also the merge order.

use super::ImportError;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default pattern for batch file names
pub const DEFAULT_BATCH_PATTERN: &str = "batch-*.json";

// Hidden files are only matched by a pattern that starts with a literal dot
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Compile a batch file-name pattern
pub fn compile_pattern(pattern: &str) -> Result<Pattern, glob::PatternError> {
    Pattern::new(pattern)
}

/// List the batch files in `dir` matching `pattern`, sorted by file name
///
/// A directory with no matching files yields an empty list.
pub fn discover_batches(dir: &Path, pattern: &Pattern) -> Result<Vec<PathBuf>, ImportError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| ImportError::io(dir, &e))?;

    let mut found: Vec<(String, PathBuf)> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| ImportError::io(dir, &e))?;
        // Follows symlinks
        if !entry.path().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if pattern.matches_with(&file_name, MATCH_OPTIONS) {
            found.push((file_name, entry.path()));
        } else {
            debug!("Skipping {} (does not match {})", file_name, pattern);
        }
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));

    info!(
        "Discovered {} batch files matching {} in {}",
        found.len(),
        pattern,
        dir.display()
    );
    Ok(found.into_iter().map(|(_, path)| path).collect())
}
