//! Schema error types

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by schema descriptors and the schema registry
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// No schema registered for the requested table
    #[error("table '{0}' has no registered schema")]
    UnknownTable(String),

    /// A schema for this table is already registered; registrations are
    /// immutable once loaded
    #[error("schema for table '{0}' is already registered")]
    Duplicate(String),

    /// The descriptor violates its own structural rules
    #[error("invalid schema for table '{table}': {reason}")]
    Invalid { table: String, reason: String },

    /// A schema file on disk could not be read or parsed
    #[error("malformed schema file '{path}': {reason}")]
    Malformed { path: String, reason: String },
}

impl SchemaError {
    /// Create an invalid-descriptor error
    pub fn invalid(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-file error
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
