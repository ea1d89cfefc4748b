//! Typed schema description consumed by the DDL generators.
//!
//! These types are plain data: they carry what the caller declared and
//! nothing that is derived from it. Derived columns, constraint names and
//! triggers are computed by the generator when a table is built.

mod database;
mod field;
mod foreign_key;
mod table;

pub use database::DatabaseSpec;
pub use field::FieldSpec;
pub use foreign_key::ForeignKeySpec;
pub use table::{TableComment, TableSpec, UniqueConstraint};
