//! Compilation error types
//!
//! Hard validation failures abort the whole compilation and surface as the
//! single result; store faults pass through unclassified. `is_rejection`
//! separates client-input errors from server faults so the surrounding
//! layer can map them to its protocol.

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors raised while compiling a document into an insertion stack
#[derive(Debug, Error)]
pub enum CompileError {
    /// The request body (root document) is not a JSON object
    #[error("request body for '{0}' must be a JSON object")]
    InvalidBody(String),

    /// One or more schema-required fields are absent from a node
    #[error("table '{table}': required fields missing: {missing:?}")]
    MissingRequired {
        table: String,
        required: Vec<String>,
        missing: Vec<String>,
    },

    /// One or more declared-unique fields collide with existing rows
    #[error("table '{table}': unique fields already taken: {colliding:?}")]
    UniqueConflict {
        table: String,
        unique: Vec<String>,
        colliding: Vec<String>,
    },

    /// Schema registry failure (unknown table, malformed descriptor)
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Unclassified fault from the backing store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Credential transform failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl CompileError {
    /// Stable machine-readable code for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingRequired { .. } => "MISSING_REQUIRED_FIELDS",
            Self::UniqueConflict { .. } => "UNIQUE_CONSTRAINT",
            Self::Schema(SchemaError::UnknownTable(_)) => "UNKNOWN_TABLE",
            Self::Schema(_) => "SCHEMA_ERROR",
            Self::Store(_) => "STORE_ERROR",
            Self::Crypto(_) => "CRYPTO_ERROR",
        }
    }

    /// Whether this failure is a rejection of the client's input, as
    /// opposed to a server-side fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidBody(_)
                | Self::MissingRequired { .. }
                | Self::UniqueConflict { .. }
                | Self::Schema(SchemaError::UnknownTable(_))
        )
    }

    /// The table the failure was raised for, when one applies.
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::InvalidBody(table) => Some(table),
            Self::MissingRequired { table, .. } => Some(table),
            Self::UniqueConflict { table, .. } => Some(table),
            Self::Schema(SchemaError::UnknownTable(table)) => Some(table),
            _ => None,
        }
    }
}
