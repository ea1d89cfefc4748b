//! Error types for DDL generation.

use sqlgen_schema::SchemaError;
use thiserror::Error;

/// Result type alias for DDL generation.
pub type DdlResult<T> = Result<T, DdlError>;

/// Errors raised while building a table or database for rendering.
///
/// Rendering itself never fails; every check happens when the table is built.
#[derive(Debug, Error)]
pub enum DdlError {
    /// The description failed validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A table was built without a database to live in.
    #[error("table `{table}` has no database")]
    MissingDatabase {
        /// Table name.
        table: String,
    },

    /// A caller column uses the name of a generated column.
    #[error("column `{table}.{column}` collides with a generated column")]
    ReservedColumn {
        /// Table name.
        table: String,
        /// Offending column.
        column: String,
    },

    /// A unique constraint names a column the table does not have.
    #[error("unique constraint on `{table}` names unknown column `{column}`")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Offending column.
        column: String,
    },

    /// No column is flagged as part of the primary key.
    #[error("table `{table}` has no primary key column")]
    EmptyPrimaryKey {
        /// Table name.
        table: String,
    },
}

impl DdlError {
    /// Create a reserved column error.
    pub fn reserved_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::ReservedColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create an unknown column error.
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Check if this error came from description validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}
