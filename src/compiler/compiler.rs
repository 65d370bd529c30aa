//! Stack compilation
//!
//! The recursive core: walks a nested create-request document depth-first,
//! validates every node against its table schema, and assembles the
//! ordered insertion stack. The first hard failure anywhere in the tree
//! voids the whole result.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::document::ValueKind;
use crate::schema::{parent_link_field, referenced_table};
use crate::store::{BoxFuture, ExistenceOracle, SchemaProvider, UniquenessOracle};

use super::errors::{CompileError, CompileResult};
use super::record::{InsertRecord, InsertStack};
use super::validator::{NodeRef, ObjectValidator};

/// Compiles nested create-request documents into insertion stacks.
///
/// Holds only `Arc` handles to read-only providers; one compilation per
/// document, no state shared across invocations.
pub struct StackCompiler {
    schemas: Arc<dyn SchemaProvider>,
    existence: Arc<dyn ExistenceOracle>,
    uniqueness: Arc<dyn UniquenessOracle>,
}

impl StackCompiler {
    pub fn new(
        schemas: Arc<dyn SchemaProvider>,
        existence: Arc<dyn ExistenceOracle>,
        uniqueness: Arc<dyn UniquenessOracle>,
    ) -> Self {
        Self {
            schemas,
            existence,
            uniqueness,
        }
    }

    /// Compiles `body` as a create request against `table`.
    ///
    /// Returns the ordered insertion stack — the root's record first, then
    /// descendants depth-first in the order their fields occur in the
    /// document — or the first hard validation failure from any depth.
    pub async fn compile(&self, table: &str, body: &Value) -> CompileResult<InsertStack> {
        let root = body
            .as_object()
            .ok_or_else(|| CompileError::InvalidBody(table.to_string()))?;

        let stack = self.compile_node(table, root, None).await?;
        debug!(table, records = stack.len(), "compiled insertion stack");
        Ok(stack)
    }

    /// Compiles one node and its descendants. Recursion suspends at every
    /// oracle call; the walk is strictly sequential, so stack order and
    /// first-error-wins are deterministic.
    fn compile_node<'a>(
        &'a self,
        table: &'a str,
        body: &'a Map<String, Value>,
        parent: Option<NodeRef<'a>>,
    ) -> BoxFuture<'a, CompileResult<Vec<InsertRecord>>> {
        Box::pin(async move {
            let schema = self.schemas.get_schema(table).await?;
            let node = NodeRef { table, body };

            // the root acts as its own parent, so its fields run through
            // the same inheritance and required-check path as any child
            let validator = ObjectValidator::new(
                self.schemas.as_ref(),
                self.existence.as_ref(),
                self.uniqueness.as_ref(),
            );
            let mut row = validator.validate(parent.unwrap_or(node), table, body).await?;

            // descend into child-table fields of the original body, in
            // the order the document declares them
            let mut children: Vec<InsertRecord> = Vec::new();
            for (field, value) in body {
                if !schema.is_child_table(field) {
                    continue;
                }

                match ValueKind::classify(value) {
                    ValueKind::Object => {
                        if let Some(child) = value.as_object() {
                            children.extend(self.compile_node(field, child, Some(node)).await?);
                        }
                    }
                    ValueKind::Array => {
                        let elements = value.as_array().map(Vec::as_slice).unwrap_or(&[]);
                        for element in elements {
                            if ValueKind::classify(element) != ValueKind::Object {
                                continue;
                            }
                            if let Some(child) = element.as_object() {
                                children
                                    .extend(self.compile_node(field, child, Some(node)).await?);
                            }
                        }
                    }
                    kind => {
                        // a scalar cannot carry a nested record
                        trace!(table, field = field.as_str(), %kind, "skipping non-document child-table field");
                    }
                }
            }

            // defense in depth: re-check references surviving on the row
            // now that the whole subtree has been walked
            let mut dangling = Vec::new();
            for field in &schema.id_fields {
                if let Some(id) = row.get(field) {
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

            // a child missing its foreign key gets it back-filled by the
            // execution layer once the parent row exists
            let parent_link = parent.and_then(|p| {
                let link = parent_link_field(p.table);
                (schema.has_field(&link) && !row.contains_key(&link)).then_some(link)
            });

            let mut stack = Vec::with_capacity(1 + children.len());
            stack.push(InsertRecord {
                table: table.to_string(),
                body: row,
                parent_link,
            });
            stack.extend(children);
            Ok(stack)
        })
    }
}
