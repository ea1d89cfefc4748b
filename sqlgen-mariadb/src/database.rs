//! Database rendering and schema preamble bookkeeping.

use std::sync::Arc;

use indexmap::IndexSet;
use sqlgen_schema::{DatabaseSpec, GeneratorConfig};

use crate::error::DdlResult;
use crate::identifier::quote;
use crate::table::Table;
use crate::writer::SqlWriter;

/// Names of the schemas whose `CREATE SCHEMA` preamble has been emitted.
///
/// Owned by the caller and threaded through [`Database::to_sql_tracked`], so
/// the same schema rendered twice in one run gets a single preamble.
#[derive(Debug, Clone, Default)]
pub struct EmittedSchemas {
    names: IndexSet<String>,
}

impl EmittedSchemas {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`; returns `false` if it was already recorded.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    /// Whether `name` has been recorded.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Recorded names, in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of recorded names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A database ready for rendering.
#[derive(Debug, Clone)]
pub struct Database {
    name: String,
    create_schema: bool,
    tables: Vec<Table>,
    config: Arc<GeneratorConfig>,
}

impl Database {
    /// Build a database with the default configuration.
    pub fn new(spec: &DatabaseSpec) -> DdlResult<Self> {
        Self::with_config(spec, Arc::new(GeneratorConfig::default()))
    }

    /// Validate the description and build every table.
    pub fn with_config(spec: &DatabaseSpec, config: Arc<GeneratorConfig>) -> DdlResult<Self> {
        sqlgen_schema::validate_database(spec)?;

        let tables = spec
            .all_tables()
            .map(|table| Table::build(table, &spec.name, Arc::clone(&config)))
            .collect::<DdlResult<Vec<_>>>()?;

        tracing::debug!(database = %spec.name, tables = tables.len(), "built database");

        Ok(Self {
            name: spec.name.clone(),
            create_schema: spec.create_schema,
            tables,
            config,
        })
    }

    /// Database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tables in rendering order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Whether the description asks for a `CREATE SCHEMA` preamble.
    pub fn creates_schema(&self) -> bool {
        self.create_schema
    }

    /// The `CREATE SCHEMA` preamble.
    pub fn schema_preamble(&self) -> String {
        let mut writer = SqlWriter::new();
        writer.banner(&format!("Database {}", self.name));
        writer.line(format!(
            "CREATE SCHEMA IF NOT EXISTS {} DEFAULT CHARACTER SET {};",
            quote(&self.name),
            self.config.output.charset
        ));
        writer.blank();
        writer.finish()
    }

    /// Render the preamble (if requested) and every table.
    pub fn to_sql(&self) -> String {
        self.render(self.create_schema)
    }

    /// Like [`Database::to_sql`], but skip a preamble already recorded in
    /// `emitted`.
    pub fn to_sql_tracked(&self, emitted: &mut EmittedSchemas) -> String {
        let emit = self.create_schema && emitted.insert(&self.name);
        if self.create_schema && !emit {
            tracing::debug!(database = %self.name, "schema preamble already emitted");
        }
        self.render(emit)
    }

    fn render(&self, emit_schema: bool) -> String {
        let mut writer = SqlWriter::new();
        if emit_schema {
            writer.append(&self.schema_preamble());
        }
        for table in &self.tables {
            writer.append(&table.to_sql());
        }
        writer.finish()
    }
}
