//! The document-to-insert-stack compiler.
//!
//! `StackCompiler::compile` is the crate's sole public entry point for
//! the request-handling layer: it takes the target table and the raw
//! parsed body and returns either the ordered insertion stack or a
//! structured error.

pub mod compiler;
pub mod errors;
pub mod record;
pub mod validator;

pub use compiler::StackCompiler;
pub use errors::{CompileError, CompileResult};
pub use record::{InsertRecord, InsertStack};
pub use validator::{NodeRef, ObjectValidator};
