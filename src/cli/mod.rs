//! Command-line support for the `artisan-merge` binary

pub mod commands;
pub mod error;

pub use error::CliError;
