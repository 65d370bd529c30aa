//! Table schema descriptors
//!
//! A `TableSchema` is the per-table metadata the compiler validates against:
//! - `fields`: the only column names a row may carry
//! - `required`: subset of `fields` that must be present
//! - `unique`: subset of `fields` checked against existing rows
//! - `id_fields`: subset of `fields` referencing another table's id,
//!   named `<singular-table>_id` by convention
//! - `tables`: field names that denote nested child tables

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Immutable schema descriptor for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name (plural by convention, e.g. `orders`)
    pub table: String,
    /// Permitted column names
    pub fields: Vec<String>,
    /// Fields that must be present on every row
    #[serde(default)]
    pub required: Vec<String>,
    /// Fields that may not collide with existing rows
    #[serde(default)]
    pub unique: Vec<String>,
    /// Foreign-key fields, `<singular-table>_id` by convention
    #[serde(default)]
    pub id_fields: Vec<String>,
    /// Field names carrying nested child-table documents
    #[serde(default)]
    pub tables: Vec<String>,
}

impl TableSchema {
    /// Create a schema with only its permitted fields declared.
    pub fn new(table: impl Into<String>, fields: Vec<&str>) -> Self {
        Self {
            table: table.into(),
            fields: fields.into_iter().map(String::from).collect(),
            required: Vec::new(),
            unique: Vec::new(),
            id_fields: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Declare required fields.
    pub fn with_required(mut self, fields: Vec<&str>) -> Self {
        self.required = fields.into_iter().map(String::from).collect();
        self
    }

    /// Declare unique fields.
    pub fn with_unique(mut self, fields: Vec<&str>) -> Self {
        self.unique = fields.into_iter().map(String::from).collect();
        self
    }

    /// Declare foreign-key fields.
    pub fn with_id_fields(mut self, fields: Vec<&str>) -> Self {
        self.id_fields = fields.into_iter().map(String::from).collect();
        self
    }

    /// Declare nested child tables.
    pub fn with_tables(mut self, tables: Vec<&str>) -> Self {
        self.tables = tables.into_iter().map(String::from).collect();
        self
    }

    /// Whether `name` is a permitted column.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Whether `name` denotes a nested child table.
    pub fn is_child_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t == name)
    }

    /// Projects a body down to exactly the declared fields, preserving the
    /// body's own field order. Absent optional fields stay absent.
    pub fn fill(&self, body: &Map<String, Value>) -> Map<String, Value> {
        body.iter()
            .filter(|(name, _)| self.has_field(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Validates the descriptor itself (not a document).
    ///
    /// `required`, `unique` and `id_fields` must all be subsets of `fields`,
    /// and foreign-key fields must follow the `<singular>_id` convention.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.table.is_empty() {
            return Err("schema must name its table".into());
        }

        for field in &self.required {
            if !self.has_field(field) {
                return Err(format!("required field '{}' is not declared in fields", field));
            }
        }
        for field in &self.unique {
            if !self.has_field(field) {
                return Err(format!("unique field '{}' is not declared in fields", field));
            }
        }
        for field in &self.id_fields {
            if !self.has_field(field) {
                return Err(format!("id field '{}' is not declared in fields", field));
            }
            if !field.ends_with("_id") {
                return Err(format!(
                    "id field '{}' does not follow the <table>_id convention",
                    field
                ));
            }
        }

        Ok(())
    }
}

/// Foreign-key field a child row uses to reference rows of `table`:
/// the singular table name plus `_id` (`orders` → `order_id`).
pub fn parent_link_field(table: &str) -> String {
    format!("{}_id", table.strip_suffix('s').unwrap_or(table))
}

/// Table referenced by a foreign-key field: the field minus its `_id`
/// suffix, pluralized (`customer_id` → `customers`).
pub fn referenced_table(id_field: &str) -> String {
    format!("{}s", id_field.strip_suffix("_id").unwrap_or(id_field))
}
