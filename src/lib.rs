//! rowstack - compiles nested create-request documents into ordered
//! per-table row-insertion stacks.
//!
//! A request body may embed related child documents and arrays (an order
//! embedding line-items embedding options). `compiler::StackCompiler`
//! walks that tree against per-table schema metadata, enforcing schema,
//! foreign-key and uniqueness contracts at every level, and emits a flat
//! stack of sanitized rows for the execution layer to apply in order.

pub mod compiler;
pub mod crypto;
pub mod document;
pub mod schema;
pub mod store;
