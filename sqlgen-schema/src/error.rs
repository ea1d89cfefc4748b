//! Error types for schema descriptions and generator configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while validating a schema description or loading configuration.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(sqlgen::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid database definition.
    #[error("invalid database `{name}`: {message}")]
    #[diagnostic(code(sqlgen::schema::invalid_database))]
    InvalidDatabase { name: String, message: String },

    /// Invalid table definition.
    #[error("invalid table `{name}`: {message}")]
    #[diagnostic(code(sqlgen::schema::invalid_table))]
    InvalidTable { name: String, message: String },

    /// Invalid field definition.
    #[error("invalid field `{table}.{field}`: {message}")]
    #[diagnostic(code(sqlgen::schema::invalid_field))]
    InvalidField {
        table: String,
        field: String,
        message: String,
    },

    /// Invalid foreign key definition.
    #[error("invalid foreign key `{table}.{field}`: {message}")]
    #[diagnostic(
        code(sqlgen::schema::invalid_foreign_key),
        help("every foreign key needs a non-empty `referenced_table`")
    )]
    InvalidForeignKey {
        table: String,
        field: String,
        message: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(sqlgen::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(sqlgen::schema::config_error))]
    ConfigError { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(sqlgen::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Validation error with multiple issues.
    #[error("schema validation failed with {count} error(s)")]
    #[diagnostic(code(sqlgen::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create an invalid database error.
    pub fn invalid_database(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDatabase {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid table error.
    pub fn invalid_table(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTable {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(
        table: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            table: table.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid foreign key error.
    pub fn invalid_foreign_key(
        table: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidForeignKey {
            table: table.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Number of individual problems carried by this error.
    pub fn problem_count(&self) -> usize {
        match self {
            Self::ValidationFailed { count, .. } => *count,
            _ => 1,
        }
    }
}
