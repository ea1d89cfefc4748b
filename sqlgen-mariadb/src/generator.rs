//! Entry point tying configuration to rendering.

use std::sync::Arc;

use sqlgen_schema::{DatabaseSpec, GeneratorConfig, TableSpec};

use crate::database::{Database, EmittedSchemas};
use crate::error::{DdlError, DdlResult};
use crate::table::Table;

/// SQL generator for MariaDB.
#[derive(Debug, Clone, Default)]
pub struct MariaDbGenerator {
    config: Arc<GeneratorConfig>,
}

impl MariaDbGenerator {
    /// Create a generator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with the given configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build a table in `database`.
    pub fn table(&self, spec: &TableSpec, database: &str) -> DdlResult<Table> {
        Table::with_config(spec, database, Arc::clone(&self.config))
    }

    /// Build a database and its tables.
    pub fn database(&self, spec: &DatabaseSpec) -> DdlResult<Database> {
        Database::with_config(spec, Arc::clone(&self.config))
    }

    /// Render a single table; the description must name its database.
    pub fn generate_table(&self, spec: &TableSpec) -> DdlResult<String> {
        let database = spec
            .database_name
            .as_deref()
            .ok_or_else(|| DdlError::MissingDatabase {
                table: spec.name.clone(),
            })?;
        Ok(self.table(spec, database)?.to_sql())
    }

    /// Render a database, honouring its `create_schema` flag.
    pub fn generate_database(&self, spec: &DatabaseSpec) -> DdlResult<String> {
        Ok(self.database(spec)?.to_sql())
    }

    /// Render several databases into one script.
    ///
    /// Everything is built before anything is rendered, so an invalid
    /// description yields an error and no partial script. A database name that
    /// appears more than once gets a single schema preamble.
    pub fn generate_all<'a, I>(&self, specs: I) -> DdlResult<String>
    where
        I: IntoIterator<Item = &'a DatabaseSpec>,
    {
        let databases = specs
            .into_iter()
            .map(|spec| self.database(spec))
            .collect::<DdlResult<Vec<_>>>()?;

        let mut emitted = EmittedSchemas::new();
        Ok(databases
            .iter()
            .map(|database| database.to_sql_tracked(&mut emitted))
            .collect())
    }
}
