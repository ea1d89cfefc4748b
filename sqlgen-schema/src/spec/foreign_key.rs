//! Foreign key descriptions.

use serde::{Deserialize, Serialize};

use super::FieldSpec;

/// A column that references the `id` of another table.
///
/// The column itself is an ordinary [`FieldSpec`]; the reference is carried
/// next to it. In serialized form the column keys and the reference keys sit
/// side by side in one flat map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeySpec {
    /// The referencing column.
    #[serde(flatten)]
    pub column: FieldSpec,
    /// Name of the referenced table.
    #[serde(alias = "references")]
    pub referenced_table: String,
    /// Database holding the referenced table, when it is not the table's own.
    #[serde(default, alias = "database", skip_serializing_if = "Option::is_none")]
    pub referenced_database: Option<String>,
}

impl ForeignKeySpec {
    /// Create a nullable foreign key column referencing `referenced_table`.
    pub fn new(name: impl Into<String>, referenced_table: impl Into<String>) -> Self {
        Self {
            column: FieldSpec::new(name),
            referenced_table: referenced_table.into(),
            referenced_database: None,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.column.name
    }

    /// Set the column type (defaults to the configured key type).
    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.column = self.column.sql_type(sql_type);
        self
    }

    /// Mark the column `NOT NULL`.
    pub fn not_null(mut self) -> Self {
        self.column = self.column.not_null();
        self
    }

    /// Render an `AFTER` hint for this column.
    pub fn after(mut self, column: impl Into<String>) -> Self {
        self.column = self.column.after(column);
        self
    }

    /// Exclude the column from the audit mirror.
    pub fn hidden_from_audit(mut self) -> Self {
        self.column = self.column.hidden_from_audit();
        self
    }

    /// Set the column comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.column = self.column.comment(comment);
        self
    }

    /// Reference a table in another database.
    pub fn in_database(mut self, database: impl Into<String>) -> Self {
        self.referenced_database = Some(database.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder() {
        let fk = ForeignKeySpec::new("owner_id", "user")
            .not_null()
            .in_database("accounts");

        assert_eq!(fk.name(), "owner_id");
        assert!(fk.column.not_null);
        assert_eq!(fk.referenced_table, "user");
        assert_eq!(fk.referenced_database.as_deref(), Some("accounts"));
    }

    #[test]
    fn test_deserialize_flat_record() {
        let fk: ForeignKeySpec = serde_json::from_str(
            r#"{"name": "category_id", "references": "category", "not_null": true, "database": "catalog"}"#,
        )
        .unwrap();

        assert_eq!(fk.name(), "category_id");
        assert!(fk.column.not_null);
        assert_eq!(fk.column.sql_type, None);
        assert_eq!(fk.referenced_table, "category");
        assert_eq!(fk.referenced_database.as_deref(), Some("catalog"));
    }

    #[test]
    fn test_missing_reference_is_rejected() {
        let result = serde_json::from_str::<ForeignKeySpec>(r#"{"name": "category_id"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("referenced_table"));
    }

    #[test]
    fn test_serialize_is_flat() {
        let fk = ForeignKeySpec::new("owner_id", "user").not_null();
        let value = serde_json::to_value(&fk).unwrap();

        assert_eq!(value["name"], "owner_id");
        assert_eq!(value["referenced_table"], "user");
        assert_eq!(value["not_null"], true);
        assert!(value.get("column").is_none());
    }

    #[test]
    fn test_column_aliases_apply_to_foreign_keys() {
        let fk: ForeignKeySpec = serde_json::from_str(
            r#"{"name": "parent_id", "references": "node", "type": "BIGINT", "after": "id", "hide_audit": true, "default": 0}"#,
        )
        .unwrap();

        assert_eq!(fk.column.sql_type.as_deref(), Some("BIGINT"));
        assert_eq!(fk.column.insert_after.as_deref(), Some("id"));
        assert!(fk.column.hidden_from_audit);
        assert_eq!(fk.column.default.as_deref(), Some("0"));
    }
}
