//! Column values: plain fields and foreign keys.
//!
//! Both render the same column-definition clause. A [`ForeignKey`] carries its
//! reference next to the column; the constraint itself is built by the table
//! because its name depends on the table and on the audit context.

use sqlgen_schema::{FieldSpec, ForeignKeySpec};

use crate::identifier::{escape_literal, qualified, quote};

/// A resolved column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    sql_type: String,
    not_null: bool,
    default: Option<String>,
    auto_increment: bool,
    primary_key: bool,
    after: Option<String>,
    hidden_from_audit: bool,
    comment: Option<String>,
}

impl Field {
    /// Resolve a caller column; an untyped column gets `key_type`.
    pub fn from_spec(spec: &FieldSpec, key_type: &str) -> Self {
        Self {
            name: spec.name.clone(),
            sql_type: spec.sql_type.clone().unwrap_or_else(|| key_type.to_string()),
            not_null: spec.not_null,
            default: spec.default.clone().filter(|d| !d.is_empty()),
            auto_increment: spec.auto_increment,
            primary_key: spec.is_primary_key,
            after: spec.insert_after.clone(),
            hidden_from_audit: spec.hidden_from_audit,
            comment: spec.comment.clone(),
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved SQL type.
    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }

    /// Whether the column is part of the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Whether the column is left out of the audit mirror.
    pub fn is_hidden_from_audit(&self) -> bool {
        self.hidden_from_audit
    }

    /// `` `name` TYPE [NOT NULL] [DEFAULT x] [AUTO_INCREMENT] [AFTER `c`] [COMMENT '...'] ``
    pub fn to_sql(&self) -> String {
        let mut parts = vec![quote(&self.name), self.sql_type.clone()];

        if self.not_null {
            parts.push("NOT NULL".to_string());
        }

        if let Some(default) = &self.default {
            parts.push(format!("DEFAULT {default}"));
        }

        if self.auto_increment {
            parts.push("AUTO_INCREMENT".to_string());
        }

        if let Some(after) = &self.after {
            parts.push(format!("AFTER {}", quote(after)));
        }

        if let Some(comment) = &self.comment {
            parts.push(format!("COMMENT '{}'", escape_literal(comment)));
        }

        parts.join(" ")
    }
}

/// A column referencing the `id` of another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    column: Field,
    references: String,
    database: Option<String>,
}

impl ForeignKey {
    /// Resolve a caller foreign key; an untyped column gets `key_type`.
    pub fn from_spec(spec: &ForeignKeySpec, key_type: &str) -> Self {
        Self {
            column: Field::from_spec(&spec.column, key_type),
            references: spec.referenced_table.clone(),
            database: spec.referenced_database.clone(),
        }
    }

    /// The referencing column.
    pub fn column(&self) -> &Field {
        &self.column
    }

    /// Column name.
    pub fn name(&self) -> &str {
        self.column.name()
    }

    /// Referenced table.
    pub fn references(&self) -> &str {
        &self.references
    }

    /// Database of the referenced table, when it is not the table's own.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Qualified referenced table, falling back to `default_database`.
    pub fn target(&self, default_database: &str) -> String {
        qualified(
            self.database().unwrap_or(default_database),
            &self.references,
        )
    }

    /// The column-definition clause; identical to a plain field's.
    pub fn to_sql(&self) -> String {
        self.column.to_sql()
    }
}
