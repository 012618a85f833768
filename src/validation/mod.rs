//! Validation functionality
//!
//! Provides validation for values interpolated into generated SQL as
//! identifiers.

pub mod input;

pub use input::{ValidationError, validate_table_name};
