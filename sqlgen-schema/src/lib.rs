//! # sqlgen-schema
//!
//! Typed schema description for the sqlgen DDL generators.
//!
//! This crate provides:
//! - Strongly typed table, column and foreign key descriptions
//! - Construction-time validation of those descriptions
//! - Configuration parser for `sqlgen.toml` files
//!
//! ## Example
//!
//! ```rust
//! use sqlgen_schema::{FieldSpec, ForeignKeySpec, TableSpec, validate_table};
//!
//! let table = TableSpec::new("widget")
//!     .in_database("shop")
//!     .audit(true)
//!     .field(FieldSpec::new("label").sql_type("VARCHAR(64)").not_null())
//!     .foreign_key(ForeignKeySpec::new("category_id", "category").not_null())
//!     .unique(["label"]);
//!
//! validate_table(&table).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod spec;
pub mod validator;

pub use config::GeneratorConfig;
pub use error::{SchemaError, SchemaResult};
pub use spec::*;
pub use validator::{Validator, validate_database, validate_table, validate_table_in};
