//! Database descriptions.

use serde::{Deserialize, Serialize};

use super::TableSpec;

/// A database and the tables it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    /// Database (schema) name.
    pub name: String,

    /// Emit a `CREATE SCHEMA` preamble.
    #[serde(default = "default_true")]
    pub create_schema: bool,

    /// A single table, rendered before `tables`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableSpec>,

    /// Tables, in rendering order.
    #[serde(default, alias = "table_list")]
    pub tables: Vec<TableSpec>,
}

fn default_true() -> bool {
    true
}

impl DatabaseSpec {
    /// Create an empty database that emits its schema preamble.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            create_schema: true,
            table: None,
            tables: Vec::new(),
        }
    }

    /// Choose whether the `CREATE SCHEMA` preamble is emitted.
    pub fn create_schema(mut self, create: bool) -> Self {
        self.create_schema = create;
        self
    }

    /// Append a table.
    pub fn with_table(mut self, table: TableSpec) -> Self {
        self.tables.push(table);
        self
    }

    /// Every table in rendering order.
    pub fn all_tables(&self) -> impl Iterator<Item = &TableSpec> {
        self.table.iter().chain(self.tables.iter())
    }
}
