//! Schema loader
//!
//! Loads table schemas from a directory of JSON files into an in-memory
//! registry. One file per table, named `schema_<table>.json`. The registry
//! is loaded once and read-only afterwards; re-registering a table is an
//! error. The loader is the crate's file-backed [`SchemaProvider`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{BoxFuture, SchemaProvider};

use super::errors::{SchemaError, SchemaResult};
use super::types::TableSchema;

/// File-backed schema registry.
pub struct SchemaLoader {
    /// Directory containing `schema_<table>.json` files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by table name
    schemas: HashMap<String, TableSchema>,
}

impl SchemaLoader {
    /// Creates a loader over the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: HashMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every schema file from the schema directory.
    ///
    /// A missing directory is created empty; a malformed file aborts the
    /// whole load.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                SchemaError::malformed(
                    self.schema_dir.display().to_string(),
                    format!("failed to create schema directory: {}", e),
                )
            })?;
            return Ok(());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(
                self.schema_dir.display().to_string(),
                format!("failed to read schema directory: {}", e),
            )
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(
                    self.schema_dir.display().to_string(),
                    format!("failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_schema_file(&path)?;
        }

        Ok(())
    }

    /// Loads a single schema file into the registry.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("failed to read file: {}", e))
        })?;

        let schema: TableSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|reason| SchemaError::invalid(&schema.table, reason))?;

        if self.schemas.contains_key(&schema.table) {
            return Err(SchemaError::Duplicate(schema.table));
        }
        self.schemas.insert(schema.table.clone(), schema);

        Ok(())
    }

    /// Registers a schema directly (tests, programmatic setup).
    pub fn register(&mut self, schema: TableSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::invalid(&schema.table, reason))?;

        if self.schemas.contains_key(&schema.table) {
            return Err(SchemaError::Duplicate(schema.table));
        }
        self.schemas.insert(schema.table.clone(), schema);
        Ok(())
    }

    /// Gets a schema by table name.
    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.schemas.get(table)
    }

    /// Whether a schema for `table` is registered.
    pub fn contains(&self, table: &str) -> bool {
        self.schemas.contains_key(table)
    }

    /// Number of registered schemas.
    pub fn table_count(&self) -> usize {
        self.schemas.len()
    }

    /// Writes a schema to its file in the schema directory.
    pub fn save_schema(&self, schema: &TableSchema) -> SchemaResult<PathBuf> {
        let path = self.schema_dir.join(format!("schema_{}.json", schema.table));

        if path.exists() {
            return Err(SchemaError::Duplicate(schema.table.clone()));
        }

        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                SchemaError::malformed(
                    self.schema_dir.display().to_string(),
                    format!("failed to create schema directory: {}", e),
                )
            })?;
        }

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed(
                path.display().to_string(),
                format!("failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("failed to write file: {}", e))
        })?;

        Ok(path)
    }
}

impl SchemaProvider for SchemaLoader {
    fn get_schema<'a>(&'a self, table: &'a str) -> BoxFuture<'a, SchemaResult<TableSchema>> {
        Box::pin(async move {
            self.get(table)
                .cloned()
                .ok_or_else(|| SchemaError::UnknownTable(table.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_schema() -> TableSchema {
        TableSchema::new("users", vec!["name", "email"])
            .with_required(vec!["name"])
            .with_unique(vec!["email"])
    }

    #[test]
    fn test_register_and_get() {
        let tmp = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(tmp.path());

        loader.register(sample_schema()).unwrap();

        let schema = loader.get("users");
        assert!(schema.is_some());
        assert_eq!(schema.unwrap().table, "users");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(tmp.path());

        loader.register(sample_schema()).unwrap();

        let result = loader.register(sample_schema());
        assert!(matches!(result, Err(SchemaError::Duplicate(_))));
    }

    #[test]
    fn test_invalid_structure_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(tmp.path());

        let schema = TableSchema::new("users", vec!["name"]).with_required(vec!["email"]);
        assert!(loader.register(schema).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(tmp.path());
        loader.save_schema(&sample_schema()).unwrap();

        let mut loader2 = SchemaLoader::new(tmp.path());
        loader2.load_all().unwrap();

        assert!(loader2.contains("users"));
        assert_eq!(loader2.get("users").unwrap(), &sample_schema());
    }

    #[test]
    fn test_load_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(&tmp.path().join("missing"));

        loader.load_all().unwrap();
        assert_eq!(loader.table_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_unknown_table() {
        let tmp = TempDir::new().unwrap();
        let loader = SchemaLoader::new(tmp.path());

        let result = loader.get_schema("nonexistent").await;
        assert!(matches!(result, Err(SchemaError::UnknownTable(_))));
    }
}
