//! Craft batch models
//!
//! A batch document is a JSON array of craft entries. Each entry names a craft
//! and lists the artisans recorded for it:
//!
//! ```json
//! [
//!   {
//!     "craft_id": "c1",
//!     "craft_name": "Weaving",
//!     "artisans": [{ "name": "Kenji", "quote": "It's fine" }]
//!   }
//! ]
//! ```

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One input document: craft entries in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CraftBatch {
    /// Identity of the source the batch was loaded from (a file path for on-disk batches)
    pub source: String,
    /// Craft entries in document order
    pub entries: Vec<CraftEntry>,
}

impl CraftBatch {
    /// Total number of artisans across all entries
    pub fn artisan_count(&self) -> usize {
        self.entries.iter().map(|e| e.artisans.len()).sum()
    }
}

/// A craft category with its artisans
#[derive(Debug, Clone, PartialEq)]
pub struct CraftEntry {
    /// Externally assigned stable craft identifier
    pub craft_id: String,
    /// Craft name, used as the merge key
    pub craft_name: String,
    pub artisans: Vec<ArtisanRecord>,
}

/// A single practitioner record
///
/// The typed fields feed SQL rendering. `raw` keeps the object exactly as it
/// was read so the lookup document can reproduce it without renaming keys or
/// dropping fields this crate does not know about.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtisanRecord {
    pub name: String,
    pub generation: Option<String>,
    pub biography: Option<String>,
    pub philosophy: Option<String>,
    pub quote: Option<String>,
    pub workshop_name: Option<String>,
    raw: Map<String, Value>,
}

/// A field-level problem found while reading an artisan object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl ArtisanRecord {
    /// Build a record from a JSON object
    ///
    /// `name` must be a string. Optional fields may be absent, `null` or a
    /// string; an empty string is treated the same as absent.
    pub fn from_object(raw: Map<String, Value>) -> Result<Self, FieldError> {
        let name = match raw.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(FieldError {
                    field: "name",
                    message: format!("expected a string, found {}", json_type_name(other)),
                });
            }
            None => {
                return Err(FieldError {
                    field: "name",
                    message: "required field is missing".to_string(),
                });
            }
        };

        Ok(Self {
            name,
            generation: optional_string(&raw, "generation")?,
            biography: optional_string(&raw, "biography")?,
            philosophy: optional_string(&raw, "philosophy")?,
            quote: optional_string(&raw, "quote")?,
            workshop_name: optional_string(&raw, "workshop_name")?,
            raw,
        })
    }

    /// The artisan object as it appeared in the source document
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl Serialize for ArtisanRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

fn optional_string(
    raw: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, FieldError> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(FieldError {
            field,
            message: format!("expected a string or null, found {}", json_type_name(other)),
        }),
    }
}

/// Human-readable JSON type name for error messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
