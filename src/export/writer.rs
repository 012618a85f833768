//! Artifact persistence
//!
//! Each artifact is written to a temporary file beside its target, flushed
//! to disk and renamed into place, so a reader never observes a half-written
//! file. [`write_artifacts`] stages every artifact before renaming any of
//! them; if staging fails, the targets are left untouched.

use super::ExportError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn io_error(path: &Path, context: &str, err: std::io::Error) -> ExportError {
    ExportError::IoError {
        path: path.to_path_buf(),
        message: format!("{}: {}", context, err),
    }
}

fn temp_path_for(path: &Path) -> Result<PathBuf, ExportError> {
    let file_name = path.file_name().ok_or_else(|| ExportError::IoError {
        path: path.to_path_buf(),
        message: "output path has no file name".to_string(),
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Write `content` next to `path` and return the temporary path
fn stage(path: &Path, content: &str) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(path, "failed to create directory", e))?;
    }

    let temp_path = temp_path_for(path)?;
    let mut file = fs::File::create(&temp_path).map_err(|e| io_error(&temp_path, "create", e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| io_error(&temp_path, "write", e))?;
    file.sync_all().map_err(|e| io_error(&temp_path, "fsync", e))?;

    debug!("Staged {} bytes at {}", content.len(), temp_path.display());
    Ok(temp_path)
}

fn commit(temp_path: &Path, path: &Path) -> Result<(), ExportError> {
    fs::rename(temp_path, path)
        .map_err(|e| io_error(path, &format!("rename from {}", temp_path.display()), e))
}

/// Atomically write a single file
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ExportError> {
    let temp_path = stage(path, content)?;
    if let Err(e) = commit(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    info!("Wrote {}", path.display());
    Ok(())
}

/// Atomically write several files, staging all of them before renaming any
///
/// Every target must be distinct, since each is staged to a temp file beside it.
pub fn write_artifacts(artifacts: &[(&Path, &str)]) -> Result<(), ExportError> {
    for (i, &(path, _)) in artifacts.iter().enumerate() {
        if artifacts[..i].iter().any(|&(other, _)| other == path) {
            return Err(ExportError::ValidationError(format!(
                "{} is the target of more than one artifact",
                path.display()
            )));
        }
    }

    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(artifacts.len());
    for &(path, content) in artifacts {
        match stage(path, content) {
            Ok(temp_path) => staged.push((temp_path, path)),
            Err(e) => {
                for (temp_path, _) in &staged {
                    let _ = fs::remove_file(temp_path);
                }
                return Err(e);
            }
        }
    }

    for (i, (temp_path, path)) in staged.iter().enumerate() {
        if let Err(e) = commit(temp_path, path) {
            for (leftover, _) in &staged[i..] {
                let _ = fs::remove_file(leftover);
            }
            return Err(e);
        }
        info!("Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/artisans-all.json");
        write_atomic(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!dir.path().join("nested/out/.artisans-all.json.tmp").exists());
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sql");
        fs::write(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_artifacts_leaves_targets_untouched_on_staging_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("lookup.json");
        fs::write(&good, "previous").unwrap();

        // A regular file where a parent directory is required makes staging fail
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let bad = blocker.join("out.sql");

        let result = write_artifacts(&[(good.as_path(), "next"), (bad.as_path(), "sql")]);
        assert!(matches!(result, Err(ExportError::IoError { .. })));
        assert_eq!(fs::read_to_string(&good).unwrap(), "previous");
        assert!(!dir.path().join(".lookup.json.tmp").exists());
    }

    #[test]
    fn test_write_artifacts_rejects_shared_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artisans-all.json");
        fs::write(&path, "previous").unwrap();

        let result = write_artifacts(&[(path.as_path(), "{}"), (path.as_path(), "DELETE")]);
        assert!(matches!(result, Err(ExportError::ValidationError(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
        assert!(!dir.path().join(".artisans-all.json.tmp").exists());
    }
}
