//! Table descriptions.

use serde::{Deserialize, Serialize};

use super::{FieldSpec, ForeignKeySpec};

/// An ordered group of columns that must be unique together.
///
/// The order only affects the generated index name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueConstraint {
    /// Column names, in index order.
    pub columns: Vec<String>,
}

impl UniqueConstraint {
    /// Create a unique constraint over the given columns.
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Column names, in index order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// A table comment, either a single string or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableComment {
    /// Single-string comment.
    Text(String),
    /// Multi-line comment, joined with `\n`.
    Lines(Vec<String>),
}

impl TableComment {
    /// The comment as one string.
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Lines(lines) => lines.join("\n"),
        }
    }
}

impl From<&str> for TableComment {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TableComment {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for TableComment {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

/// A table as declared by the caller, before derived columns are injected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Table name.
    pub name: String,

    /// Database the table lives in. Overridden by the enclosing database.
    #[serde(default, alias = "database", skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,

    /// Mirror every insert and update into an `audit_<name>` table.
    #[serde(default, alias = "audit")]
    pub audit_enabled: bool,

    /// Caller-declared columns, in order.
    #[serde(alias = "field_list")]
    pub fields: Vec<FieldSpec>,

    /// Caller-declared foreign keys, in order.
    #[serde(default, alias = "fk_list")]
    pub foreign_keys: Vec<ForeignKeySpec>,

    /// Unique column groups.
    #[serde(default, alias = "unique_list")]
    pub unique_constraints: Vec<UniqueConstraint>,

    /// Table comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<TableComment>,
}

impl TableSpec {
    /// Create an empty, unaudited table description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database_name: None,
            audit_enabled: false,
            fields: Vec::new(),
            foreign_keys: Vec::new(),
            unique_constraints: Vec::new(),
            comment: None,
        }
    }

    /// Set the database the table lives in.
    pub fn in_database(mut self, database: impl Into<String>) -> Self {
        self.database_name = Some(database.into());
        self
    }

    /// Enable or disable the audit mirror.
    pub fn audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    /// Append a column.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a foreign key.
    pub fn foreign_key(mut self, foreign_key: ForeignKeySpec) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Append a unique constraint.
    pub fn unique(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.unique_constraints.push(UniqueConstraint::new(columns));
        self
    }

    /// Set the table comment.
    pub fn comment(mut self, comment: impl Into<TableComment>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Names of every caller-declared column, fields first.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.foreign_keys.iter().map(|fk| fk.name()))
    }
}
