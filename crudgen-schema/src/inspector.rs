//! Schema inspection interface.

use indexmap::IndexMap;
use thiserror::Error;

use crate::ColumnMetadata;

/// Error raised by a schema inspector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    #[error("table '{table}' does not exist")]
    UnknownTable { table: String },

    #[error("schema source unavailable: {message}")]
    Unavailable { message: String },
}

/// Source of table and column metadata.
pub trait SchemaInspector {
    /// List table names in source order.
    fn list_tables(&self) -> Result<Vec<String>, InspectError>;

    /// Describe the columns of `table` in declaration order.
    fn describe_table(&self, table: &str) -> Result<Vec<ColumnMetadata>, InspectError>;
}

/// Inspector over tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryInspector {
    tables: IndexMap<String, Vec<ColumnMetadata>>,
}

impl MemoryInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table (consuming builder).
    pub fn with_table(mut self, name: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        self.insert(name, columns);
        self
    }

    /// Add or replace a table, keeping its original position when replaced.
    pub fn insert(&mut self, name: impl Into<String>, columns: Vec<ColumnMetadata>) {
        self.tables.insert(name.into(), columns);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl SchemaInspector for MemoryInspector {
    fn list_tables(&self) -> Result<Vec<String>, InspectError> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn describe_table(&self, table: &str) -> Result<Vec<ColumnMetadata>, InspectError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| InspectError::UnknownTable {
                table: table.to_string(),
            })
    }
}
