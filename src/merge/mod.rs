//! Batch merging
//!
//! Folds craft batches, in processing order, into a [`MergedLookup`] and a flat
//! sequence of [`SqlRow`]s. The two accumulate independently:
//!
//! - The lookup is keyed by craft name; a later entry with the same name
//!   replaces the earlier artisans (last write wins).
//! - Every artisan of every processed entry becomes a row with a freshly
//!   generated id, including artisans whose craft name is later overwritten
//!   in the lookup.

pub mod id;

pub use id::{IdGenerator, RandomIdGenerator};

use crate::models::{CraftBatch, CraftEntry, MergedLookup, SqlRow};
use tracing::{debug, info, warn};

/// Outcome of merging all batches
#[derive(Debug, Clone, Default)]
#[must_use = "merge results carry the lookup and SQL rows to emit"]
pub struct MergeResult {
    pub lookup: MergedLookup,
    /// Rows in processing order: source, then entry, then artisan
    pub rows: Vec<SqlRow>,
    /// Craft entries processed, counting repeated craft names each time
    pub crafts_processed: usize,
    /// Entries whose craft name replaced an earlier entry in the lookup
    pub overwritten_crafts: usize,
}

impl MergeResult {
    pub fn artisan_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Accumulator for the merge fold
pub struct Merger<G: IdGenerator> {
    id_generator: G,
    result: MergeResult,
}

impl<G: IdGenerator> Merger<G> {
    pub fn new(id_generator: G) -> Self {
        Self {
            id_generator,
            result: MergeResult::default(),
        }
    }

    /// Fold every entry of a batch, in document order
    pub fn add_batch(&mut self, batch: CraftBatch) {
        debug!(
            "Merging {} entries from {}",
            batch.entries.len(),
            batch.source
        );
        for entry in batch.entries {
            self.add_entry(entry);
        }
    }

    /// Fold a single craft entry
    pub fn add_entry(&mut self, entry: CraftEntry) {
        for artisan in &entry.artisans {
            let id = self.id_generator.next_id();
            self.result
                .rows
                .push(SqlRow::from_artisan(id, &entry.craft_id, artisan));
        }

        self.result.crafts_processed += 1;

        let artisan_count = entry.artisans.len();
        if let Some(previous) = self
            .result
            .lookup
            .insert(entry.craft_name.clone(), entry.artisans)
        {
            self.result.overwritten_crafts += 1;
            warn!(
                "Craft '{}' redefined: {} artisans replaced by {} in lookup",
                entry.craft_name,
                previous.len(),
                artisan_count
            );
        }
    }

    pub fn finish(self) -> MergeResult {
        info!(
            "Merged {} crafts ({} distinct), {} artisan rows",
            self.result.crafts_processed,
            self.result.lookup.len(),
            self.result.rows.len()
        );
        self.result
    }
}

/// Merge batches in the order given
pub fn merge_batches<G, I>(batches: I, id_generator: G) -> MergeResult
where
    G: IdGenerator,
    I: IntoIterator<Item = CraftBatch>,
{
    let mut merger = Merger::new(id_generator);
    for batch in batches {
        merger.add_batch(batch);
    }
    merger.finish()
}
