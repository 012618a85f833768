//! Flattened artisan rows for SQL emission

use super::craft::ArtisanRecord;
use uuid::Uuid;

/// One row of the artisans table, prior to escaping
///
/// Field order matches the target column order:
/// `(id, name, craft_id, generation, biography, philosophy, quote, workshop_name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlRow {
    pub id: Uuid,
    pub name: String,
    pub craft_id: String,
    pub generation: Option<String>,
    pub biography: Option<String>,
    pub philosophy: Option<String>,
    pub quote: Option<String>,
    pub workshop_name: Option<String>,
}

impl SqlRow {
    pub fn from_artisan(id: Uuid, craft_id: &str, artisan: &ArtisanRecord) -> Self {
        Self {
            id,
            name: artisan.name.clone(),
            craft_id: craft_id.to_string(),
            generation: artisan.generation.clone(),
            biography: artisan.biography.clone(),
            philosophy: artisan.philosophy.clone(),
            quote: artisan.quote.clone(),
            workshop_name: artisan.workshop_name.clone(),
        }
    }

    /// Nullable columns in column order
    pub fn nullable_values(&self) -> [Option<&str>; 5] {
        [
            self.generation.as_deref(),
            self.biography.as_deref(),
            self.philosophy.as_deref(),
            self.quote.as_deref(),
            self.workshop_name.as_deref(),
        ]
    }
}
