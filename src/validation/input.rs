//! Input validation utilities.
//!
//! Checks values that end up as unquoted SQL identifiers in the emitted
//! script. Row values never pass through here; they are always emitted as
//! escaped literals.

use thiserror::Error;

/// Maximum length for table names
pub const MAX_TABLE_NAME_LENGTH: usize = 255;

/// Errors that can occur during input validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {reason}")]
    InvalidCharacters { field: &'static str, reason: String },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),

    /// Input is a reserved word
    #[error("{field} cannot be a reserved word: {word}")]
    ReservedWord { field: &'static str, word: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a table name for use as an unquoted identifier.
///
/// # Rules
///
/// - Must not be empty
/// - Must not exceed 255 characters
/// - May be schema-qualified (`schema.table`); each part must start with a
///   letter or underscore and contain only letters, digits and underscores
/// - No part may be a SQL reserved word
///
/// # Examples
///
/// ```
/// use artisan_merge::validation::input::validate_table_name;
///
/// assert!(validate_table_name("artisans").is_ok());
/// assert!(validate_table_name("public.artisans").is_ok());
/// assert!(validate_table_name("").is_err());
/// assert!(validate_table_name("123_invalid").is_err());
/// assert!(validate_table_name("artisans; DROP TABLE crafts").is_err());
/// ```
pub fn validate_table_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("table name"));
    }

    if name.len() > MAX_TABLE_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "table name",
            max: MAX_TABLE_NAME_LENGTH,
            actual: name.len(),
        });
    }

    for part in name.split('.') {
        let Some(first_char) = part.chars().next() else {
            return Err(ValidationError::InvalidFormat(
                "table name",
                "empty segment in qualified name".to_string(),
            ));
        };

        if !first_char.is_alphabetic() && first_char != '_' {
            return Err(ValidationError::InvalidFormat(
                "table name",
                "must start with a letter or underscore".to_string(),
            ));
        }

        if let Some(c) = part.chars().find(|c| !c.is_alphanumeric() && *c != '_') {
            return Err(ValidationError::InvalidCharacters {
                field: "table name",
                reason: format!("invalid character: '{}'", c),
            });
        }

        if is_sql_reserved_word(part) {
            return Err(ValidationError::ReservedWord {
                field: "table name",
                word: part.to_string(),
            });
        }
    }

    Ok(())
}

/// Check if a word is a SQL reserved word.
fn is_sql_reserved_word(word: &str) -> bool {
    const RESERVED_WORDS: &[&str] = &[
        "select", "from", "where", "insert", "update", "delete", "create", "drop", "alter",
        "table", "index", "view", "database", "schema", "grant", "revoke", "commit",
        "rollback", "begin", "end", "transaction", "primary", "foreign", "key", "references",
        "constraint", "unique", "check", "default", "not", "null", "and", "or", "in",
        "between", "like", "is", "case", "when", "then", "else", "as", "on", "join", "inner",
        "outer", "left", "right", "full", "cross", "natural", "using", "group", "by", "having",
        "order", "asc", "desc", "limit", "offset", "union", "intersect", "except", "all",
        "distinct", "top", "values", "set", "into", "exec", "execute", "procedure",
        "function", "trigger", "true", "false",
    ];

    let lower = word.to_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
}
