//! Object validation
//!
//! Validates a single (parent, table, body) node against its schema and
//! produces the sanitized row that enters the insertion stack. The
//! caller's body is never mutated; every change lands on a working copy.
//!
//! Order of operations: dangling-reference drop, parent inheritance,
//! derived-date fill, required check, uniqueness check, password
//! transform, schema projection. Required failures report before
//! uniqueness failures; both abort before the password transform runs.

use serde_json::{Map, Value};
use tracing::debug;

use crate::crypto;
use crate::document::default_date;
use crate::schema::{parent_link_field, referenced_table};
use crate::store::{ExistenceOracle, SchemaProvider, UniquenessOracle};

use super::errors::{CompileError, CompileResult};

/// Read-only view of a document node, used as the parent reference during
/// recursion.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub table: &'a str,
    pub body: &'a Map<String, Value>,
}

/// Validates one document node against its table schema.
pub struct ObjectValidator<'a> {
    schemas: &'a dyn SchemaProvider,
    existence: &'a dyn ExistenceOracle,
    uniqueness: &'a dyn UniquenessOracle,
}

impl<'a> ObjectValidator<'a> {
    pub fn new(
        schemas: &'a dyn SchemaProvider,
        existence: &'a dyn ExistenceOracle,
        uniqueness: &'a dyn UniquenessOracle,
    ) -> Self {
        Self {
            schemas,
            existence,
            uniqueness,
        }
    }

    /// Validates `body` as a row of `table`, inheriting absent fields from
    /// `parent`. Returns the schema-projected sanitized row, or the first
    /// hard failure.
    pub async fn validate(
        &self,
        parent: NodeRef<'_>,
        table: &str,
        body: &Map<String, Value>,
    ) -> CompileResult<Map<String, Value>> {
        let schema = self.schemas.get_schema(table).await?;
        let mut row = body.clone();

        // invalid foreign associations degrade to absent fields
        let mut dangling = Vec::new();
        for field in &schema.id_fields {
            if let Some(id) = body.get(field) {
                let target = referenced_table(field);
                if !self.existence.exists_id(&target, id).await? {
                    dangling.push(field.clone());
                }
            }
        }
        for field in dangling {
            debug!(table, field = field.as_str(), "dropping unresolved id reference");
            row.remove(&field);
        }

        // inherit declared fields the parent already carries
        for field in &schema.fields {
            if !row.contains_key(field) {
                if let Some(value) = parent.body.get(field) {
                    row.insert(field.clone(), value.clone());
                }
            }
        }

        // derived fill precedes the required check, so `date` may be
        // declared required while callers omit it
        if !row.contains_key("date") {
            row.insert("date".to_string(), Value::String(default_date()));
        }

        // the immediate parent link is exempt: the execution layer
        // back-fills it after the parent row is inserted
        let parent_link = parent_link_field(parent.table);
        let missing: Vec<String> = schema
            .required
            .iter()
            .filter(|field| **field != parent_link)
            .filter(|field| !row.contains_key(*field))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(CompileError::MissingRequired {
                table: table.to_string(),
                required: schema.required.clone(),
                missing,
            });
        }

        let report = self.uniqueness.check_unique(table, &row).await?;
        if !report.is_clean() {
            return Err(CompileError::UniqueConflict {
                table: table.to_string(),
                unique: report.unique_fields,
                colliding: report.colliding_fields,
            });
        }

        // one-way transform; only string secrets are hashable
        let hashed = match row.get("password") {
            Some(Value::String(secret)) => Some(crypto::hash_password(secret)?),
            _ => None,
        };
        if let Some(hash) = hashed {
            row.insert("password".to_string(), Value::String(hash));
        }

        Ok(schema.fill(&row))
    }
}
