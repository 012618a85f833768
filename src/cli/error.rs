//! CLI-specific error types

use crate::config::ConfigError;
use crate::pipeline::RunError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Project root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Merge failed: {0}")]
    RunError(#[from] RunError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
