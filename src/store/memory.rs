//! In-memory store
//!
//! A reference backend implementing all three oracle traits over plain
//! maps. Schemas are registered up front and read-only once the store is
//! shared; rows live behind an `RwLock` so tests can seed data through a
//! shared handle.
//!
//! Id lookup follows the store's column convention: string ids live in the
//! table's `<singular>_id` column, numeric ids in `id`.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::schema::{parent_link_field, SchemaError, SchemaResult, TableSchema};

use super::errors::{StoreError, StoreResult};
use super::oracle::{BoxFuture, ExistenceOracle, SchemaProvider, UniqueReport, UniquenessOracle};

/// In-memory schema registry plus row store.
pub struct InMemoryStore {
    /// Registered schemas, immutable once the store is shared
    schemas: HashMap<String, TableSchema>,
    /// Rows per table
    rows: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a table schema. Registration happens before the store is
    /// shared; duplicates are rejected.
    pub fn register_schema(&mut self, schema: TableSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::invalid(&schema.table, reason))?;

        if self.schemas.contains_key(&schema.table) {
            return Err(SchemaError::Duplicate(schema.table));
        }
        self.schemas.insert(schema.table.clone(), schema);
        Ok(())
    }

    /// Inserts a row, assigning a generated string id under the table's
    /// `<singular>_id` column when the row carries no id of its own.
    /// Returns the row's id value as a string.
    pub fn insert_row(&self, table: &str, mut row: Map<String, Value>) -> StoreResult<String> {
        let id_column = parent_link_field(table);
        let existing = row.get("id").or_else(|| row.get(&id_column)).cloned();

        let id = match existing {
            Some(Value::String(id)) => id,
            Some(other) => other.to_string(),
            None => {
                let generated = uuid::Uuid::new_v4().to_string();
                row.insert(id_column, Value::String(generated.clone()));
                generated
            }
        };

        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        rows.entry(table.to_string()).or_default().push(row);

        Ok(id)
    }

    /// Number of rows currently stored for `table`.
    pub fn row_count(&self, table: &str) -> StoreResult<usize> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.get(table).map_or(0, Vec::len))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaProvider for InMemoryStore {
    fn get_schema<'a>(&'a self, table: &'a str) -> BoxFuture<'a, SchemaResult<TableSchema>> {
        Box::pin(async move {
            self.schemas
                .get(table)
                .cloned()
                .ok_or_else(|| SchemaError::UnknownTable(table.to_string()))
        })
    }
}

impl ExistenceOracle for InMemoryStore {
    fn exists_id<'a>(&'a self, table: &'a str, id: &'a Value) -> BoxFuture<'a, StoreResult<bool>> {
        Box::pin(async move {
            // String ids live in the <singular>_id column, numeric ids in `id`
            let column = if id.is_string() {
                parent_link_field(table)
            } else {
                "id".to_string()
            };

            let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
            let found = rows
                .get(table)
                .map_or(false, |rows| rows.iter().any(|row| row.get(&column) == Some(id)));

            Ok(found)
        })
    }
}

impl UniquenessOracle for InMemoryStore {
    fn check_unique<'a>(
        &'a self,
        table: &'a str,
        body: &'a Map<String, Value>,
    ) -> BoxFuture<'a, StoreResult<UniqueReport>> {
        Box::pin(async move {
            let unique_fields = self
                .schemas
                .get(table)
                .map(|schema| schema.unique.clone())
                .unwrap_or_default();

            let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
            let table_rows: &[Map<String, Value>] =
                rows.get(table).map(Vec::as_slice).unwrap_or(&[]);

            let colliding_fields = unique_fields
                .iter()
                .filter(|field| {
                    body.get(*field).map_or(false, |candidate| {
                        table_rows.iter().any(|row| row.get(*field) == Some(candidate))
                    })
                })
                .cloned()
                .collect();

            Ok(UniqueReport {
                unique_fields,
                colliding_fields,
            })
        })
    }
}
