//! Merge configuration file support
//!
//! Handles parsing of `.artisan-merge.toml` configuration files and
//! environment variable overrides. Relative paths are resolved against the
//! project root the run is started from.

use crate::export::sql::{DEFAULT_CHUNK_SIZE, DEFAULT_TABLE, validate_chunk_size};
use crate::import::discover::{DEFAULT_BATCH_PATTERN, compile_pattern};
use crate::validation::validate_table_name;
use glob::Pattern;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".artisan-merge.toml";

/// Default directory holding batch documents
pub const DEFAULT_BATCH_DIR: &str = "data/artisans";

/// Default lookup document path
pub const DEFAULT_LOOKUP_PATH: &str = "src/data/artisans-all.json";

/// Default SQL script path
pub const DEFAULT_SQL_PATH: &str = "supabase/003-insert-artisans.sql";

/// Environment variable for the batch directory
pub const ENV_BATCH_DIR: &str = "ARTISAN_MERGE_BATCH_DIR";

/// Environment variable for the lookup document path
pub const ENV_LOOKUP_PATH: &str = "ARTISAN_MERGE_LOOKUP_PATH";

/// Environment variable for the SQL script path
pub const ENV_SQL_PATH: &str = "ARTISAN_MERGE_SQL_PATH";

/// Environment variable for the target table
pub const ENV_TABLE: &str = "ARTISAN_MERGE_TABLE";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Config parse error: {0}")]
    ParseError(String),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Input configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputSection {
    /// Directory holding batch documents
    #[serde(default = "default_batch_dir")]
    pub batch_dir: String,

    /// Glob pattern for batch file names (`*`, `?`, `[...]`)
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_batch_dir() -> String {
    DEFAULT_BATCH_DIR.to_string()
}

fn default_pattern() -> String {
    DEFAULT_BATCH_PATTERN.to_string()
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            batch_dir: default_batch_dir(),
            pattern: default_pattern(),
        }
    }
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputSection {
    /// Lookup document path
    #[serde(default = "default_lookup_path")]
    pub lookup_path: String,

    /// SQL script path
    #[serde(default = "default_sql_path")]
    pub sql_path: String,
}

fn default_lookup_path() -> String {
    DEFAULT_LOOKUP_PATH.to_string()
}

fn default_sql_path() -> String {
    DEFAULT_SQL_PATH.to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            lookup_path: default_lookup_path(),
            sql_path: default_sql_path(),
        }
    }
}

/// SQL rendering section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqlSection {
    /// Target table name
    #[serde(default = "default_table")]
    pub table: String,

    /// Rows per INSERT statement (1 to 50)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for SqlSection {
    fn default() -> Self {
        Self {
            table: default_table(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.artisan-merge.toml` configuration file format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct MergeConfig {
    #[serde(default)]
    pub input: InputSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub sql: SqlSection,
}

impl MergeConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a project root
    ///
    /// Looks for `.artisan-merge.toml` in the root directory.
    /// Falls back to defaults if not found. Environment overrides are applied.
    pub fn load(root: &Path) -> ConfigResult<Self> {
        let config_path = root.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit file, without environment overrides
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::IoError(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(ENV_BATCH_DIR) {
            self.input.batch_dir = dir;
        }

        if let Ok(path) = std::env::var(ENV_LOOKUP_PATH) {
            self.output.lookup_path = path;
        }

        if let Ok(path) = std::env::var(ENV_SQL_PATH) {
            self.output.sql_path = path;
        }

        if let Ok(table) = std::env::var(ENV_TABLE) {
            self.sql.table = table;
        }
    }

    /// Check values that would otherwise fail late in the run
    pub fn validate(&self) -> ConfigResult<()> {
        self.batch_pattern()?;

        if self.output.lookup_path.is_empty() || self.output.sql_path.is_empty() {
            return Err(ConfigError::ValidationError(
                "output paths cannot be empty".to_string(),
            ));
        }

        // Each artifact needs its own target
        if Path::new(&self.output.lookup_path) == Path::new(&self.output.sql_path) {
            return Err(ConfigError::ValidationError(format!(
                "output.lookup_path and output.sql_path are both {}",
                self.output.lookup_path
            )));
        }

        validate_table_name(&self.sql.table)
            .map_err(|e| ConfigError::ValidationError(format!("sql.table: {}", e)))?;

        validate_chunk_size(self.sql.chunk_size)
            .map_err(|e| ConfigError::ValidationError(format!("sql.chunk_size: {}", e)))?;

        Ok(())
    }

    /// Compiled batch file-name pattern
    pub fn batch_pattern(&self) -> ConfigResult<Pattern> {
        if self.input.pattern.is_empty() {
            return Err(ConfigError::ValidationError(
                "input.pattern cannot be empty".to_string(),
            ));
        }
        compile_pattern(&self.input.pattern).map_err(|e| {
            ConfigError::ValidationError(format!("input.pattern {}: {}", self.input.pattern, e))
        })
    }

    /// Batch directory for a project root
    pub fn batch_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.input.batch_dir)
    }

    /// Lookup document path for a project root
    pub fn lookup_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.output.lookup_path)
    }

    /// SQL script path for a project root
    pub fn sql_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.output.sql_path)
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        root.join(path)
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Artisan merge configuration

[input]
# Directory holding batch documents (relative to the project root, or absolute)
batch_dir = "data/artisans"

# Batch file-name pattern; files are merged in file-name order
pattern = "batch-*.json"

[output]
# Lookup document keyed by craft name
lookup_path = "src/data/artisans-all.json"

# Bulk-load SQL script
sql_path = "supabase/003-insert-artisans.sql"

[sql]
# Target table for DELETE / INSERT statements
table = "artisans"

# Rows per INSERT statement (1 to 50)
chunk_size = 50
"#
}
