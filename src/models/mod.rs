//! Models module
//!
//! Defines the data structures that flow through the load, merge and emit
//! stages: input batches, the merged lookup and flattened SQL rows.

pub mod craft;
pub mod lookup;
pub mod row;

pub use craft::{ArtisanRecord, CraftBatch, CraftEntry, FieldError};
pub use lookup::MergedLookup;
pub use row::SqlRow;
