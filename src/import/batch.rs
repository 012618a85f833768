//! Craft batch importer
//!
//! Parses batch documents into [`CraftBatch`] models. The whole document is
//! checked before it is accepted; the first shape problem found is reported
//! with the document identity and the path of the offending field.

use super::ImportError;
use crate::models::craft::json_type_name;
use crate::models::{ArtisanRecord, CraftBatch, CraftEntry};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Importer for craft batch JSON documents
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchImporter;

impl BatchImporter {
    /// Create a new batch importer instance
    pub fn new() -> Self {
        Self
    }

    /// Parse batch content
    ///
    /// # Arguments
    ///
    /// * `document` - Identity of the source, used in error messages
    /// * `content` - JSON text of the batch
    ///
    /// # Example
    ///
    /// ```rust
    /// use artisan_merge::import::BatchImporter;
    ///
    /// let json = r#"[{"craft_id": "c1", "craft_name": "Weaving", "artisans": [{"name": "Aiko"}]}]"#;
    /// let batch = BatchImporter::new().import("batch-001.json", json).unwrap();
    /// assert_eq!(batch.entries.len(), 1);
    /// assert_eq!(batch.entries[0].artisans[0].name, "Aiko");
    /// ```
    pub fn import(&self, document: &str, content: &str) -> Result<CraftBatch, ImportError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ImportError::schema(document, "$", format!("invalid JSON: {}", e)))?;

        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(ImportError::schema(
                    document,
                    "$",
                    format!(
                        "expected an array of craft entries, found {}",
                        json_type_name(&other)
                    ),
                ));
            }
        };

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| self.parse_entry(document, index, item))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Parsed {} craft entries from {}", entries.len(), document);

        Ok(CraftBatch {
            source: document.to_string(),
            entries,
        })
    }

    /// Read and parse a batch file
    pub fn import_file(&self, path: &Path) -> Result<CraftBatch, ImportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ImportError::io(path, &e))?;
        self.import(&path.display().to_string(), &content)
    }

    /// Read and parse every file, in the order given
    ///
    /// Stops at the first failure; no batches are returned in that case.
    pub fn import_all(&self, paths: &[PathBuf]) -> Result<Vec<CraftBatch>, ImportError> {
        let batches = paths
            .iter()
            .map(|path| self.import_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Loaded {} batches ({} craft entries)",
            batches.len(),
            batches.iter().map(|b| b.entries.len()).sum::<usize>()
        );
        Ok(batches)
    }

    fn parse_entry(
        &self,
        document: &str,
        index: usize,
        value: Value,
    ) -> Result<CraftEntry, ImportError> {
        let path = format!("[{}]", index);
        let mut obj = expect_object(document, &path, value)?;

        let craft_id = required_string(document, &path, &obj, "craft_id")?;
        let craft_name = required_string(document, &path, &obj, "craft_name")?;

        let artisans = match obj.remove("artisans") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ImportError::schema(
                    document,
                    format!("{}.artisans", path),
                    format!("expected an array, found {}", json_type_name(&other)),
                ));
            }
            None => {
                return Err(ImportError::schema(
                    document,
                    format!("{}.artisans", path),
                    "required field is missing",
                ));
            }
        };

        let artisans = artisans
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let artisan_path = format!("{}.artisans[{}]", path, i);
                let obj = expect_object(document, &artisan_path, item)?;
                ArtisanRecord::from_object(obj).map_err(|e| {
                    ImportError::schema(
                        document,
                        format!("{}.{}", artisan_path, e.field),
                        e.message,
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CraftEntry {
            craft_id,
            craft_name,
            artisans,
        })
    }
}

fn expect_object(
    document: &str,
    path: &str,
    value: Value,
) -> Result<Map<String, Value>, ImportError> {
    match value {
        Value::Object(obj) => Ok(obj),
        other => Err(ImportError::schema(
            document,
            path,
            format!("expected an object, found {}", json_type_name(&other)),
        )),
    }
}

fn required_string(
    document: &str,
    path: &str,
    obj: &Map<String, Value>,
    key: &str,
) -> Result<String, ImportError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ImportError::schema(
            document,
            format!("{}.{}", path, key),
            format!("expected a string, found {}", json_type_name(other)),
        )),
        None => Err(ImportError::schema(
            document,
            format!("{}.{}", path, key),
            "required field is missing",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_field(err: ImportError) -> String {
        match err {
            ImportError::SchemaError { field, .. } => field,
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_import_entries_in_document_order() {
        let json = r#"[
            {"craft_id": "c1", "craft_name": "Weaving", "artisans": [{"name": "Aiko"}, {"name": "Ren"}]},
            {"craft_id": "c2", "craft_name": "Dyeing", "artisans": []}
        ]"#;
        let batch = BatchImporter::new().import("batch-001.json", json).unwrap();

        assert_eq!(batch.source, "batch-001.json");
        assert_eq!(batch.entries.len(), 2);
        assert_eq!(batch.entries[0].craft_id, "c1");
        assert_eq!(batch.entries[1].craft_name, "Dyeing");
        assert_eq!(batch.artisan_count(), 2);
    }

    #[test]
    fn test_empty_array_is_valid() {
        let batch = BatchImporter::new().import("empty.json", "[]").unwrap();
        assert!(batch.entries.is_empty());
    }

    #[test]
    fn test_top_level_object_is_rejected() {
        let err = BatchImporter::new()
            .import("b.json", r#"{"craft_id": "c1"}"#)
            .unwrap_err();
        assert_eq!(schema_field(err), "$");
    }

    #[test]
    fn test_invalid_json_is_schema_error() {
        let err = BatchImporter::new().import("b.json", "[{").unwrap_err();
        assert!(err.to_string().contains("b.json"));
        assert_eq!(schema_field(err), "$");
    }

    #[test]
    fn test_missing_craft_name_reports_path() {
        let json = r#"[
            {"craft_id": "c1", "craft_name": "Weaving", "artisans": []},
            {"craft_id": "c2", "artisans": []}
        ]"#;
        let err = BatchImporter::new().import("b.json", json).unwrap_err();
        assert_eq!(schema_field(err), "[1].craft_name");
    }

    #[test]
    fn test_artisans_must_be_array() {
        let json = r#"[{"craft_id": "c1", "craft_name": "Weaving", "artisans": {"name": "Aiko"}}]"#;
        let err = BatchImporter::new().import("b.json", json).unwrap_err();
        assert_eq!(schema_field(err), "[0].artisans");
    }

    #[test]
    fn test_artisan_without_name_reports_path() {
        let json = r#"[{"craft_id": "c1", "craft_name": "Weaving",
                        "artisans": [{"name": "Aiko"}, {"quote": "no name"}]}]"#;
        let err = BatchImporter::new().import("b.json", json).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("b.json"));
        assert_eq!(schema_field(err), "[0].artisans[1].name");
    }

    #[test]
    fn test_artisan_must_be_object() {
        let json = r#"[{"craft_id": "c1", "craft_name": "Weaving", "artisans": ["Aiko"]}]"#;
        let err = BatchImporter::new().import("b.json", json).unwrap_err();
        assert_eq!(schema_field(err), "[0].artisans[0]");
    }

    #[test]
    fn test_numeric_craft_id_is_rejected() {
        let json = r#"[{"craft_id": 7, "craft_name": "Weaving", "artisans": []}]"#;
        let err = BatchImporter::new().import("b.json", json).unwrap_err();
        assert_eq!(schema_field(err), "[0].craft_id");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch-404.json");
        let err = BatchImporter::new().import_file(&path).unwrap_err();
        match err {
            ImportError::IoError { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected IO error, got {:?}", other),
        }
    }
}
