//! Store-facing oracles: schema lookup, id existence, uniqueness.

pub mod errors;
pub mod memory;
pub mod oracle;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use oracle::{BoxFuture, ExistenceOracle, SchemaProvider, UniqueReport, UniquenessOracle};
