//! Database access layer.
//!
//! This module provides:
//! - Connection pool management (shared process-wide pool and explicit handles)
//! - Query execution returning tabular results
//! - Parameter binding
//! - PostgreSQL type mappings

pub mod executor;
pub mod params;
pub mod pool;
pub mod table;
pub mod types;

pub use executor::{describe, fetch_as_table};
pub use params::QueryParam;
pub use pool::{Database, initialize_pool};
pub use table::{ColumnDescriptor, Table, TableSchema};
