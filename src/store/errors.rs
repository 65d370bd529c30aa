//! Store error types
//!
//! Faults from the backing store reached through the oracles. The compiler
//! does not classify these; they propagate verbatim to the caller.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Unclassified backend faults
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store could not be reached or answered abnormally
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Shared state was poisoned by a panicking writer
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Create an unavailable-store error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}
