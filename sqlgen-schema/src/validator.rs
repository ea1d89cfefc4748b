//! Construction-time validation of schema descriptions.
//!
//! The validator checks the structural rules every generator relies on:
//! - Names are present and can be wrapped in backticks
//! - Foreign keys name the table they reference
//! - No column or table is declared twice
//! - Unique constraints list at least one column
//!
//! All problems are collected before failing so a caller sees the whole list
//! at once.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::spec::{DatabaseSpec, TableSpec};

/// Schema validator.
#[derive(Debug)]
pub struct Validator {
    /// Collected validation errors.
    errors: Vec<SchemaError>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Validate a database and every table in it.
    pub fn validate_database(&mut self, database: &DatabaseSpec) -> SchemaResult<()> {
        self.errors.clear();

        if let Some(message) = identifier_problem(&database.name) {
            self.errors
                .push(SchemaError::invalid_database(&database.name, message));
        }

        let mut seen = HashSet::new();
        for table in database.all_tables() {
            if !seen.insert(table.name.as_str()) {
                self.errors
                    .push(SchemaError::duplicate("table", table.name.as_str()));
            }
            self.check_table(table);
        }

        self.finish()
    }

    /// Validate a single table.
    pub fn validate_table(&mut self, table: &TableSpec) -> SchemaResult<()> {
        self.errors.clear();
        self.check_table(table);
        self.finish()
    }

    /// Validate a single table placed in `database`.
    pub fn validate_table_in(&mut self, table: &TableSpec, database: &str) -> SchemaResult<()> {
        self.errors.clear();
        if let Some(message) = identifier_problem(database) {
            self.errors.push(SchemaError::invalid_database(database, message));
        }
        self.check_table(table);
        self.finish()
    }

    fn check_table(&mut self, table: &TableSpec) {
        if let Some(message) = identifier_problem(&table.name) {
            self.errors.push(SchemaError::invalid_table(&table.name, message));
        }

        if let Some(database) = &table.database_name {
            if let Some(message) = identifier_problem(database) {
                self.errors.push(SchemaError::invalid_table(
                    &table.name,
                    format!("database name {message}"),
                ));
            }
        }

        for field in &table.fields {
            if let Some(message) = identifier_problem(&field.name) {
                self.errors
                    .push(SchemaError::invalid_field(&table.name, &field.name, message));
            }
            if field.sql_type.as_deref().is_some_and(|t| t.trim().is_empty()) {
                self.errors.push(SchemaError::invalid_field(
                    &table.name,
                    &field.name,
                    "type must not be empty",
                ));
            }
            self.check_after(table, &field.name, field.insert_after.as_deref());
        }

        for fk in &table.foreign_keys {
            if let Some(message) = identifier_problem(fk.name()) {
                self.errors
                    .push(SchemaError::invalid_foreign_key(&table.name, fk.name(), message));
            }
            if let Some(message) = identifier_problem(&fk.referenced_table) {
                self.errors.push(SchemaError::invalid_foreign_key(
                    &table.name,
                    fk.name(),
                    format!("referenced table {message}"),
                ));
            }
            if let Some(message) = fk.referenced_database.as_deref().and_then(identifier_problem) {
                self.errors.push(SchemaError::invalid_foreign_key(
                    &table.name,
                    fk.name(),
                    format!("referenced database {message}"),
                ));
            }
            self.check_after(table, fk.name(), fk.column.insert_after.as_deref());
        }

        let mut seen = HashSet::new();
        for name in table.column_names() {
            if !seen.insert(name) {
                self.errors
                    .push(SchemaError::duplicate("column", format!("{}.{}", table.name, name)));
            }
        }

        for unique in &table.unique_constraints {
            if unique.columns().is_empty() {
                self.errors.push(SchemaError::invalid_table(
                    &table.name,
                    "unique constraint without columns",
                ));
            }
            for column in unique.columns() {
                if let Some(message) = identifier_problem(column) {
                    self.errors.push(SchemaError::invalid_table(
                        &table.name,
                        format!("unique constraint column {message}"),
                    ));
                }
            }
        }
    }

    fn check_after(&mut self, table: &TableSpec, column: &str, after: Option<&str>) {
        if let Some(message) = after.and_then(identifier_problem) {
            self.errors.push(SchemaError::invalid_field(
                &table.name,
                column,
                format!("`after` column {message}"),
            ));
        }
    }

    fn finish(&mut self) -> SchemaResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            count => Err(SchemaError::ValidationFailed {
                count,
                errors: std::mem::take(&mut self.errors),
            }),
        }
    }
}

/// Why `name` cannot be used as a backtick-quoted identifier, if it can't.
fn identifier_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("must not be empty")
    } else if name.contains('`') {
        Some("must not contain backticks")
    } else {
        None
    }
}

/// Validate a table description.
pub fn validate_table(table: &TableSpec) -> SchemaResult<()> {
    Validator::new().validate_table(table)
}

/// Validate a table description placed in `database`.
pub fn validate_table_in(table: &TableSpec, database: &str) -> SchemaResult<()> {
    Validator::new().validate_table_in(table, database)
}

/// Validate a database description.
pub fn validate_database(database: &DatabaseSpec) -> SchemaResult<()> {
    Validator::new().validate_database(database)
}
