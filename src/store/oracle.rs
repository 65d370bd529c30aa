//! Oracle traits
//!
//! The read-only query capabilities the compiler consumes: schema lookup,
//! id existence, and uniqueness checking. All methods suspend; trait
//! objects box their futures so implementations can await their own
//! backends.

use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use crate::schema::{SchemaResult, TableSchema};

use super::errors::StoreResult;

/// Boxed future returned by oracle trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Supplies schema descriptors by table name.
pub trait SchemaProvider: Send + Sync {
    /// Returns the schema for `table`, or an unknown-table error.
    fn get_schema<'a>(&'a self, table: &'a str) -> BoxFuture<'a, SchemaResult<TableSchema>>;
}

/// Answers whether a candidate id resolves to an existing row.
pub trait ExistenceOracle: Send + Sync {
    /// Whether a row of `table` exists with the given id value.
    fn exists_id<'a>(&'a self, table: &'a str, id: &'a Value) -> BoxFuture<'a, StoreResult<bool>>;
}

/// Reports which declared-unique fields of a candidate row collide with
/// existing rows.
pub trait UniquenessOracle: Send + Sync {
    /// Checks `body` against existing rows of `table`.
    fn check_unique<'a>(
        &'a self,
        table: &'a str,
        body: &'a Map<String, Value>,
    ) -> BoxFuture<'a, StoreResult<UniqueReport>>;
}

/// Outcome of a uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UniqueReport {
    /// The table's declared unique fields
    pub unique_fields: Vec<String>,
    /// The subset whose values collide with an existing row
    pub colliding_fields: Vec<String>,
}

impl UniqueReport {
    /// Whether the candidate row collides with nothing.
    pub fn is_clean(&self) -> bool {
        self.colliding_fields.is_empty()
    }
}
