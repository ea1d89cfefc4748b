//! # sqlgen-mariadb
//!
//! MariaDB DDL generation for sqlgen.
//!
//! Turns a [`TableSpec`](sqlgen_schema::TableSpec) or
//! [`DatabaseSpec`](sqlgen_schema::DatabaseSpec) into an idempotent SQL script:
//!
//! - `CREATE SCHEMA IF NOT EXISTS` preamble (once per database name)
//! - `CREATE TABLE IF NOT EXISTS` with generated `id`, `active`, `create_by`,
//!   `create_time`, `update_by` and `update_time` columns
//! - foreign key constraints and unique indexes, with generated names kept
//!   within MariaDB's 64 character limit
//! - `BEFORE INSERT` / `BEFORE UPDATE` triggers stamping who changed a row
//! - for audited tables, an `audit_<table>` mirror filled by `AFTER INSERT` /
//!   `AFTER UPDATE` triggers
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ DatabaseSpec │────▶│   Database   │────▶│  SQL script  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │                    ▲
//!                             ▼                    │
//!                      ┌──────────────┐     ┌──────────────┐
//!                      │    Table     │────▶│ AuditMirror  │
//!                      └──────────────┘     └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sqlgen_mariadb::MariaDbGenerator;
//! use sqlgen_schema::{DatabaseSpec, FieldSpec, TableSpec};
//!
//! let spec = DatabaseSpec::new("shop").with_table(
//!     TableSpec::new("widget")
//!         .audit(true)
//!         .field(FieldSpec::new("label").sql_type("VARCHAR(64)").not_null())
//!         .unique(["label"]),
//! );
//!
//! let sql = MariaDbGenerator::new().generate_database(&spec).unwrap();
//! assert!(sql.contains("CREATE TABLE IF NOT EXISTS `shop`.`audit_widget` LIKE `shop`.`widget`;"));
//! ```

pub mod audit;
pub mod column;
pub mod database;
pub mod error;
pub mod generator;
pub mod identifier;
pub mod table;
pub mod trigger;
pub mod writer;

// Re-exports
pub use audit::AuditMirror;
pub use column::{Field, ForeignKey};
pub use database::{Database, EmittedSchemas};
pub use error::{DdlError, DdlResult};
pub use generator::MariaDbGenerator;
pub use identifier::{MAX_IDENTIFIER_LEN, wrap_name};
pub use table::{GENERATED_COLUMNS, ID_COLUMN, Table};
pub use trigger::{Trigger, TriggerAction, TriggerEvent, TriggerTiming};
