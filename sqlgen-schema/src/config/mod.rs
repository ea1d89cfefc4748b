//! Generator configuration (`sqlgen.toml`).
//!
//! Every setting is optional; the defaults reproduce the generator's fixed
//! output conventions.
//!
//! ```toml
//! [columns]
//! key_type = "INT UNSIGNED"
//!
//! [audit]
//! user_table = "user"
//! user_column = "who_id"
//!
//! [output]
//! engine = "InnoDB"
//! charset = "utf8"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};

/// Main configuration structure for `sqlgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Column settings.
    #[serde(default)]
    pub columns: ColumnConfig,

    /// Audit mirror settings.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl GeneratorConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "loading generator configuration");
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SchemaError::TomlError { source: e })?;
        config.check()?;
        Ok(config)
    }

    /// Reject settings that would produce unusable SQL.
    fn check(&self) -> SchemaResult<()> {
        let required = [
            ("columns.key_type", &self.columns.key_type),
            ("audit.user_table", &self.audit.user_table),
            ("audit.user_column", &self.audit.user_column),
            ("output.engine", &self.output.engine),
            ("output.charset", &self.output.charset),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(SchemaError::config(format!("`{key}` must not be empty")));
            }
        }

        Ok(())
    }
}

/// Column settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Type of `id`, of implicit foreign keys and of untyped fields.
    #[serde(default = "default_key_type")]
    pub key_type: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            key_type: default_key_type(),
        }
    }
}

fn default_key_type() -> String {
    "INT UNSIGNED".to_string()
}

/// Audit mirror settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Table referenced by the implicit "who changed it" foreign key.
    #[serde(default = "default_user_table")]
    pub user_table: String,

    /// Name of the implicit "who changed it" foreign key column.
    #[serde(default = "default_user_column")]
    pub user_column: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            user_table: default_user_table(),
            user_column: default_user_column(),
        }
    }
}

fn default_user_table() -> String {
    "user".to_string()
}

fn default_user_column() -> String {
    "who_id".to_string()
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Storage engine named in every `CREATE TABLE`.
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Default character set of `CREATE SCHEMA`.
    #[serde(default = "default_charset")]
    pub charset: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            charset: default_charset(),
        }
    }
}

fn default_engine() -> String {
    "InnoDB".to_string()
}

fn default_charset() -> String {
    "utf8".to_string()
}
