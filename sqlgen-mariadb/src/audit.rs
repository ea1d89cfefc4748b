//! The audit mirror of a table.
//!
//! An audited table `t` gets a shadow table `audit_t` cloned with
//! `CREATE TABLE ... LIKE`, then adjusted:
//!
//! 1. a `t_id` column referencing `t.id` is added after `id`;
//! 2. the unique indexes copied by the clone are dropped, since many audit
//!    rows share the values of one original row;
//! 3. the foreign keys the clone does not copy are added back under
//!    `fk_audit_*` names;
//! 4. `AFTER INSERT` / `AFTER UPDATE` triggers on `t` copy every visible
//!    column of `NEW` into a fresh audit row.

use std::iter;

use sqlgen_schema::ForeignKeySpec;

use crate::column::{Field, ForeignKey};
use crate::identifier::{qualified, quote};
use crate::table::{ID_COLUMN, Table};
use crate::trigger::{Trigger, TriggerAction, TriggerEvent, TriggerTiming};
use crate::writer::{SqlWriter, parenthesized};

/// Prefix of the shadow table name.
pub const AUDIT_PREFIX: &str = "audit_";

/// Borrowed view of a table's audit mirror.
#[derive(Debug, Clone, Copy)]
pub struct AuditMirror<'a> {
    table: &'a Table,
}

impl<'a> AuditMirror<'a> {
    pub(crate) fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Shadow table name.
    pub fn name(&self) -> String {
        format!("{AUDIT_PREFIX}{}", self.table.name())
    }

    /// `` `database`.`audit_table` ``
    pub fn full_name(&self) -> String {
        qualified(self.table.database(), &self.name())
    }

    /// The column linking an audit row to the original row.
    pub fn link_column(&self) -> ForeignKey {
        let spec = ForeignKeySpec::new(format!("{}_id", self.table.name()), self.table.name())
            .not_null()
            .after(ID_COLUMN);
        ForeignKey::from_spec(&spec, &self.table.config().columns.key_type)
    }

    /// Columns copied from `NEW`, fields first, then foreign keys.
    fn visible_columns(&self) -> impl Iterator<Item = &'a Field> + use<'a> {
        let table = self.table;
        table
            .fields()
            .iter()
            .chain(table.foreign_keys().iter().map(ForeignKey::column))
            .filter(|column| !column.is_hidden_from_audit())
    }

    /// Column list of the audit insert: the link column, then every visible
    /// column.
    pub fn mirrored_columns(&self) -> Vec<String> {
        iter::once(self.link_column().name().to_string())
            .chain(self.visible_columns().map(|c| c.name().to_string()))
            .collect()
    }

    /// `INSERT INTO audit_t (...) VALUES (NEW...)`, without a semicolon.
    pub fn insert_statement(&self) -> String {
        let columns = self.mirrored_columns().into_iter().map(|c| quote(&c));
        let values = iter::once(format!("NEW.{}", quote(ID_COLUMN))).chain(
            self.visible_columns()
                .map(|c| format!("NEW.{}", quote(c.name()))),
        );

        let head = parenthesized(&format!("INSERT INTO {}", self.full_name()), columns, "");
        parenthesized(&format!("{head} VALUES"), values, "")
    }

    /// `DROP INDEX` for every unique index copied by the clone.
    pub fn drop_unique_indexes(&self) -> Vec<String> {
        self.table
            .unique_constraints()
            .iter()
            .map(|unique| {
                format!(
                    "DROP INDEX {} ON {};",
                    quote(&self.table.unique_index_name(unique)),
                    self.full_name()
                )
            })
            .collect()
    }

    /// The foreign keys re-added to the shadow table.
    pub fn foreign_key_statements(&self) -> Vec<String> {
        self.table
            .foreign_keys()
            .iter()
            .map(|fk| self.add_constraint(fk))
            .collect()
    }

    fn add_constraint(&self, fk: &ForeignKey) -> String {
        format!(
            "ALTER TABLE {} ADD {};",
            self.full_name(),
            self.table.foreign_key_constraint(fk, true)
        )
    }

    /// The insert and update mirroring triggers.
    pub fn triggers(&self) -> [Trigger; 2] {
        [TriggerEvent::Insert, TriggerEvent::Update].map(|event| {
            Trigger::new(
                format!("{}_{}_trigger", self.name(), event.as_str()),
                TriggerTiming::After,
                event,
                self.table.full_name(),
                TriggerAction::Block(vec![self.insert_statement()]),
            )
        })
    }

    /// Render the whole audit section.
    pub fn to_sql(&self) -> String {
        tracing::trace!(audit = %self.full_name(), "rendering audit mirror");

        let link = self.link_column();
        let mut writer = SqlWriter::new();
        writer.banner(&format!("Audit Table for {}", self.table.name()));
        writer.line(format!(
            "CREATE TABLE IF NOT EXISTS {} LIKE {};",
            self.full_name(),
            self.table.full_name()
        ));
        writer.line(format!(
            "ALTER TABLE {} ADD COLUMN {};",
            self.full_name(),
            link.to_sql()
        ));
        writer.line(self.add_constraint(&link));
        writer.blank();

        writer.group(self.drop_unique_indexes());
        writer.group(self.foreign_key_statements());

        for trigger in self.triggers() {
            writer.line(trigger.to_sql());
            writer.blank();
        }

        writer.finish()
    }
}
