//! # sqlgen
//!
//! Generate idempotent MariaDB DDL from a typed schema description.
//!
//! sqlgen provides:
//! - Table, field and foreign key descriptions loadable from TOML or JSON
//! - `CREATE TABLE IF NOT EXISTS` scripts with generated bookkeeping columns
//! - Row stamping triggers for `create_by` / `update_by` / `update_time`
//! - Optional audit mirror tables filled by triggers
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlgen::prelude::*;
//!
//! let db = DatabaseSpec::new("shop")
//!     .with_table(
//!         TableSpec::new("category")
//!             .field(FieldSpec::new("title").sql_type("VARCHAR(128)").not_null()),
//!     )
//!     .with_table(
//!         TableSpec::new("widget")
//!             .audit(true)
//!             .field(FieldSpec::new("label").sql_type("VARCHAR(64)").not_null())
//!             .foreign_key(ForeignKeySpec::new("category_id", "category").not_null())
//!             .unique(["label"]),
//!     );
//!
//! let sql = MariaDbGenerator::new().generate_database(&db)?;
//! assert!(sql.starts_with("-- -----"));
//! # Ok::<(), sqlgen::DdlError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Schema descriptions, configuration and validation.
pub mod schema {
    pub use sqlgen_schema::*;
}

/// MariaDB rendering.
pub mod mariadb {
    pub use sqlgen_mariadb::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::mariadb::{Database, DdlError, DdlResult, MariaDbGenerator, Table};
    pub use crate::schema::{
        DatabaseSpec, FieldSpec, ForeignKeySpec, GeneratorConfig, TableSpec, UniqueConstraint,
    };
}

// Re-export key types at the crate root
pub use mariadb::{DdlError, MariaDbGenerator};
pub use schema::{GeneratorConfig, SchemaError};
