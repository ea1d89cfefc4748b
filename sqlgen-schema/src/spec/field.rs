//! Column descriptions.

use serde::{Deserialize, Deserializer, Serialize};

/// A caller-declared column.
///
/// Every flag defaults to `false` and every optional value to `None`, which is
/// exactly the column a bare `{ name = "..." }` entry describes. A missing
/// `sql_type` resolves to the configured key type when the table is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name (unquoted).
    pub name: String,

    /// SQL type, e.g. `VARCHAR(64)`.
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub sql_type: Option<String>,

    /// Emit `NOT NULL`.
    #[serde(default)]
    pub not_null: bool,

    /// Default value expression, rendered verbatim.
    #[serde(
        default,
        deserialize_with = "deserialize_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,

    /// Emit `AUTO_INCREMENT`.
    #[serde(default)]
    pub auto_increment: bool,

    /// Part of the primary key.
    #[serde(default, alias = "pk")]
    pub is_primary_key: bool,

    /// Positional hint rendered as `AFTER `col``.
    #[serde(default, alias = "after", skip_serializing_if = "Option::is_none")]
    pub insert_after: Option<String>,

    /// Leave this column out of the audit mirror.
    #[serde(default, alias = "hide_audit")]
    pub hidden_from_audit: bool,

    /// Column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FieldSpec {
    /// Create a nullable column with no type, default or flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the SQL type.
    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    /// Mark the column `NOT NULL`.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the default value expression.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Mark the column `AUTO_INCREMENT`.
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Include the column in the primary key.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Render an `AFTER` hint for this column.
    pub fn after(mut self, column: impl Into<String>) -> Self {
        self.insert_after = Some(column.into());
        self
    }

    /// Exclude the column from the audit mirror.
    pub fn hidden_from_audit(mut self) -> Self {
        self.hidden_from_audit = true;
        self
    }

    /// Set the column comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Accept any scalar as a default value.
///
/// Numbers are kept verbatim, `true` becomes `TRUE`; `false`, `null` and the
/// empty string mean "no default".
pub(crate) fn deserialize_default<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        UInt(u64),
        Float(f64),
        Text(String),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Scalar::Bool(false)) => None,
        Some(Scalar::Bool(true)) => Some("TRUE".to_string()),
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::UInt(n)) => Some(n.to_string()),
        Some(Scalar::Float(x)) => Some(x.to_string()),
        Some(Scalar::Text(s)) if s.is_empty() => None,
        Some(Scalar::Text(s)) => Some(s),
    })
}
