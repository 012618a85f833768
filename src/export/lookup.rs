//! Lookup document exporter
//!
//! Writes the merged lookup as a pretty-printed JSON object keyed by craft
//! name. Artisan objects are reproduced as read; generated row ids are not
//! part of this document. Non-ASCII text is written literally.

use super::{ExportError, ExportResult};
use crate::models::MergedLookup;
use tracing::info;

/// Exporter for the craft-name keyed lookup document
pub struct LookupExporter;

impl LookupExporter {
    /// Export the merged lookup to JSON
    ///
    /// # Example
    ///
    /// ```rust
    /// use artisan_merge::export::LookupExporter;
    /// use artisan_merge::models::MergedLookup;
    ///
    /// let lookup = MergedLookup::new();
    /// let result = LookupExporter::export(&lookup).unwrap();
    /// assert_eq!(result.content, "{}");
    /// ```
    pub fn export(lookup: &MergedLookup) -> Result<ExportResult, ExportError> {
        let content = serde_json::to_string_pretty(lookup).map_err(|e| {
            ExportError::SerializationError(format!("Failed to serialize lookup: {}", e))
        })?;

        info!("Rendered lookup document with {} crafts", lookup.len());

        Ok(ExportResult {
            content,
            format: "json".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::BatchImporter;
    use crate::merge::merge_batches;
    use uuid::Uuid;

    fn lookup_from(json: &str) -> MergedLookup {
        let batch = BatchImporter::new().import("test.json", json).unwrap();
        merge_batches([batch], Uuid::nil).lookup
    }

    #[test]
    fn test_pretty_printed_with_two_space_indent() {
        let lookup = lookup_from(
            r#"[{"craft_id": "c1", "craft_name": "Weaving", "artisans": [{"name": "Aiko"}]}]"#,
        );
        let result = LookupExporter::export(&lookup).unwrap();
        assert_eq!(
            result.content,
            "{\n  \"Weaving\": [\n    {\n      \"name\": \"Aiko\"\n    }\n  ]\n}"
        );
        assert_eq!(result.format, "json");
    }

    #[test]
    fn test_non_ascii_written_literally() {
        let lookup = lookup_from(
            r#"[{"craft_id": "c1", "craft_name": "西陣織", "artisans": [{"name": "山田 太郎", "generation": "三代目"}]}]"#,
        );
        let content = LookupExporter::export(&lookup).unwrap().content;
        assert!(content.contains("\"西陣織\""));
        assert!(content.contains("\"山田 太郎\""));
        assert!(content.contains("\"三代目\""));
        assert!(!content.contains("\\u"));
    }

    #[test]
    fn test_no_generated_id_injected() {
        let lookup = lookup_from(
            r#"[{"craft_id": "c1", "craft_name": "Weaving", "artisans": [{"name": "Aiko", "quote": ""}]}]"#,
        );
        let value: serde_json::Value =
            serde_json::from_str(&LookupExporter::export(&lookup).unwrap().content).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "Weaving": [{ "name": "Aiko", "quote": "" }] })
        );
    }
}
