//! Merged craft lookup
//!
//! Maps each craft name to the artisans of the last entry seen with that name.
//! Keys keep the position where they were first inserted; replacing a key's
//! artisans does not move it. Consumers read the document by key, so this
//! order carries no meaning beyond being deterministic.

use super::craft::ArtisanRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedLookup {
    entries: Vec<(String, Vec<ArtisanRecord>)>,
    index: HashMap<String, usize>,
}

impl MergedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artisans for a craft name
    ///
    /// Returns the artisans previously stored under that name, if any.
    pub fn insert(
        &mut self,
        craft_name: String,
        artisans: Vec<ArtisanRecord>,
    ) -> Option<Vec<ArtisanRecord>> {
        if let Some(&pos) = self.index.get(&craft_name) {
            return Some(std::mem::replace(&mut self.entries[pos].1, artisans));
        }

        self.index.insert(craft_name.clone(), self.entries.len());
        self.entries.push((craft_name, artisans));
        None
    }

    pub fn get(&self, craft_name: &str) -> Option<&[ArtisanRecord]> {
        self.index
            .get(craft_name)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn contains(&self, craft_name: &str) -> bool {
        self.index.contains_key(craft_name)
    }

    /// Number of distinct craft names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Craft names in document order
    pub fn craft_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ArtisanRecord])> {
        self.entries
            .iter()
            .map(|(name, artisans)| (name.as_str(), artisans.as_slice()))
    }
}

impl Serialize for MergedLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, artisans) in &self.entries {
            map.serialize_entry(name, artisans)?;
        }
        map.end()
    }
}
