//! Table generation.
//!
//! A [`Table`] is built once from a [`TableSpec`]. Building injects the
//! generated columns around the caller's own:
//!
//! ```text
//! id | <caller fields...> | active | create_by | create_time | update_by | update_time
//! ```
//!
//! and, for audited tables, prepends the "who changed it" foreign key to the
//! caller's foreign keys. Rendering is a pure function of that state and can be
//! repeated any number of times.

use std::collections::HashSet;
use std::sync::Arc;

use sqlgen_schema::{FieldSpec, ForeignKeySpec, GeneratorConfig, TableSpec, UniqueConstraint};

use crate::audit::AuditMirror;
use crate::column::{Field, ForeignKey};
use crate::error::{DdlError, DdlResult};
use crate::identifier::{escape_literal, qualified, quote, wrap_name};
use crate::trigger::{Trigger, TriggerAction, TriggerEvent, TriggerTiming};
use crate::writer::{INDENT, SqlWriter, parenthesized};

/// Surrogate key column.
pub const ID_COLUMN: &str = "id";

/// Columns every table gets, in the order they are rendered.
pub const GENERATED_COLUMNS: [&str; 6] = [
    ID_COLUMN,
    "active",
    "create_by",
    "create_time",
    "update_by",
    "update_time",
];

/// Expression stamped into `create_by` / `update_by`.
const SESSION_USER: &str = "CURRENT_USER()";

/// Expression stamped into `update_time`.
const NOW: &str = "CURRENT_TIMESTAMP(3)";

/// A table ready for rendering.
#[derive(Debug, Clone)]
pub struct Table {
    database: String,
    name: String,
    audit: bool,
    fields: Vec<Field>,
    foreign_keys: Vec<ForeignKey>,
    unique_constraints: Vec<UniqueConstraint>,
    comment: Option<String>,
    config: Arc<GeneratorConfig>,
}

impl Table {
    /// Build a table in `database` with the default configuration.
    pub fn new(spec: &TableSpec, database: &str) -> DdlResult<Self> {
        Self::with_config(spec, database, Arc::new(GeneratorConfig::default()))
    }

    /// Build a table in the database named by the description itself.
    pub fn from_spec(spec: &TableSpec) -> DdlResult<Self> {
        let database = spec
            .database_name
            .as_deref()
            .ok_or_else(|| DdlError::MissingDatabase {
                table: spec.name.clone(),
            })?;
        Self::new(spec, database)
    }

    /// Validate the description and build a table in `database`.
    pub fn with_config(
        spec: &TableSpec,
        database: &str,
        config: Arc<GeneratorConfig>,
    ) -> DdlResult<Self> {
        sqlgen_schema::validate_table_in(spec, database)?;
        Self::build(spec, database, config)
    }

    /// Build from a description that has already been validated.
    pub(crate) fn build(
        spec: &TableSpec,
        database: &str,
        config: Arc<GeneratorConfig>,
    ) -> DdlResult<Self> {
        check_reserved(spec, &config)?;

        let key_type = config.columns.key_type.as_str();
        let fields = field_list(&spec.fields, key_type);

        let mut foreign_keys = Vec::with_capacity(spec.foreign_keys.len() + 1);
        if spec.audit_enabled {
            let who = ForeignKeySpec::new(&config.audit.user_column, &config.audit.user_table)
                .not_null();
            foreign_keys.push(ForeignKey::from_spec(&who, key_type));
        }
        foreign_keys.extend(
            spec.foreign_keys
                .iter()
                .map(|fk| ForeignKey::from_spec(fk, key_type)),
        );

        let known: HashSet<&str> = fields
            .iter()
            .map(Field::name)
            .chain(foreign_keys.iter().map(ForeignKey::name))
            .collect();
        for unique in &spec.unique_constraints {
            if let Some(column) = unique.columns().iter().find(|c| !known.contains(c.as_str())) {
                return Err(DdlError::unknown_column(&spec.name, column));
            }
        }

        primary_key_columns(&spec.name, &fields)?;

        tracing::debug!(
            database,
            table = %spec.name,
            fields = fields.len(),
            foreign_keys = foreign_keys.len(),
            unique = spec.unique_constraints.len(),
            audit = spec.audit_enabled,
            "built table"
        );

        Ok(Self {
            database: database.to_string(),
            name: spec.name.clone(),
            audit: spec.audit_enabled,
            fields,
            foreign_keys,
            unique_constraints: spec.unique_constraints.clone(),
            comment: spec.comment.as_ref().map(|c| c.text()),
            config,
        })
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Database the table lives in.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// `` `database`.`table` ``
    pub fn full_name(&self) -> String {
        qualified(&self.database, &self.name)
    }

    /// Whether the audit mirror is generated.
    pub fn is_audited(&self) -> bool {
        self.audit
    }

    /// Every column, generated ones included, in rendering order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Every foreign key, the audit user key included, in rendering order.
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Unique column groups.
    pub fn unique_constraints(&self) -> &[UniqueConstraint] {
        &self.unique_constraints
    }

    /// Table comment with lines joined, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub(crate) fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Names of the primary key columns, in column order.
    pub fn primary_key(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_primary_key())
            .map(Field::name)
            .collect()
    }

    /// The audit mirror, when auditing is enabled.
    pub fn audit(&self) -> Option<AuditMirror<'_>> {
        self.audit.then(|| AuditMirror::new(self))
    }

    /// Render the whole table: `CREATE TABLE`, unique indexes, stamping
    /// triggers and, if enabled, the audit mirror.
    pub fn to_sql(&self) -> String {
        tracing::trace!(table = %self.full_name(), "rendering table");

        let mut writer = SqlWriter::new();
        writer.banner(&format!("Table {}", self.full_name()));
        writer.line(self.create_table_sql());
        writer.blank();

        writer.group(
            self.unique_constraints
                .iter()
                .map(|unique| self.unique_index_sql(unique)),
        );

        for trigger in self.stamping_triggers() {
            writer.line(trigger.to_sql());
            writer.blank();
        }

        if let Some(audit) = self.audit() {
            writer.append(&audit.to_sql());
        }

        writer.finish()
    }

    /// The `CREATE TABLE IF NOT EXISTS` statement.
    pub fn create_table_sql(&self) -> String {
        let mut body: Vec<String> = self.fields.iter().map(Field::to_sql).collect();
        body.extend(self.foreign_keys.iter().map(ForeignKey::to_sql));
        body.push(self.primary_key_clause());
        body.extend(
            self.foreign_keys
                .iter()
                .map(|fk| self.foreign_key_constraint(fk, false)),
        );

        let mut tail = format!(" Engine={}", self.config.output.engine);
        if let Some(comment) = &self.comment {
            tail.push_str(&format!(" COMMENT='{}'", escape_literal(comment)));
        }
        tail.push(';');

        parenthesized(
            &format!("CREATE TABLE IF NOT EXISTS {}", self.full_name()),
            body,
            &tail,
        )
    }

    fn primary_key_clause(&self) -> String {
        let columns: Vec<String> = self.primary_key().into_iter().map(quote).collect();
        format!("PRIMARY KEY ({})", columns.join(", "))
    }

    /// Name of the constraint for `column`; `audit` selects the mirror variant.
    pub fn constraint_name(&self, column: &str, audit: bool) -> String {
        let infix = if audit { "audit_" } else { "" };
        wrap_name(&format!("fk_{infix}{}_{column}", self.name)).into_owned()
    }

    /// `CONSTRAINT ... FOREIGN KEY ... REFERENCES ...`, without indentation.
    pub fn foreign_key_constraint(&self, fk: &ForeignKey, audit: bool) -> String {
        [
            format!("CONSTRAINT {}", quote(&self.constraint_name(fk.name(), audit))),
            format!("{INDENT}FOREIGN KEY({})", quote(fk.name())),
            format!(
                "{INDENT}REFERENCES {} ({})",
                fk.target(&self.database),
                quote(ID_COLUMN)
            ),
            format!("{INDENT}ON DELETE NO ACTION"),
            format!("{INDENT}ON UPDATE NO ACTION"),
        ]
        .join("\n")
    }

    /// Generated name of a unique index.
    pub fn unique_index_name(&self, unique: &UniqueConstraint) -> String {
        wrap_name(&format!("unique_{}_{}", self.name, unique.columns().join("_"))).into_owned()
    }

    fn unique_index_sql(&self, unique: &UniqueConstraint) -> String {
        let columns: Vec<String> = unique.columns().iter().map(|c| quote(c)).collect();
        format!(
            "CREATE UNIQUE INDEX {} ON {} ({});",
            quote(&self.unique_index_name(unique)),
            self.full_name(),
            columns.join(", ")
        )
    }

    /// The `before_insert` / `before_update` triggers stamping who and when.
    pub fn stamping_triggers(&self) -> [Trigger; 2] {
        let set = |pairs: [(&str, &str); 2]| {
            TriggerAction::SetNew(
                pairs
                    .iter()
                    .map(|(column, expr)| (column.to_string(), expr.to_string()))
                    .collect(),
            )
        };

        [
            Trigger::new(
                format!("{}_before_insert", self.name),
                TriggerTiming::Before,
                TriggerEvent::Insert,
                self.full_name(),
                set([("create_by", SESSION_USER), ("update_by", SESSION_USER)]),
            ),
            Trigger::new(
                format!("{}_before_update", self.name),
                TriggerTiming::Before,
                TriggerEvent::Update,
                self.full_name(),
                set([("update_by", SESSION_USER), ("update_time", NOW)]),
            ),
        ]
    }
}

/// `id`, the caller's fields, then the bookkeeping columns.
fn field_list(caller: &[FieldSpec], key_type: &str) -> Vec<Field> {
    let id = FieldSpec::new(ID_COLUMN)
        .sql_type(key_type)
        .not_null()
        .auto_increment()
        .primary_key()
        .hidden_from_audit();
    let trailing = [
        FieldSpec::new("active")
            .sql_type("BOOLEAN")
            .not_null()
            .default_value("1"),
        FieldSpec::new("create_by").sql_type("VARCHAR(32)").not_null(),
        FieldSpec::new("create_time")
            .sql_type("TIMESTAMP(3)")
            .not_null()
            .default_value(NOW)
            .hidden_from_audit(),
        FieldSpec::new("update_by").sql_type("VARCHAR(32)").not_null(),
        FieldSpec::new("update_time")
            .sql_type("TIMESTAMP(3)")
            .not_null()
            .default_value(NOW)
            .hidden_from_audit(),
    ];

    std::iter::once(&id)
        .chain(caller)
        .chain(trailing.iter())
        .map(|spec| Field::from_spec(spec, key_type))
        .collect()
}

/// Reject caller columns that would collide with generated ones.
fn check_reserved(spec: &TableSpec, config: &GeneratorConfig) -> DdlResult<()> {
    let link_column = format!("{}_id", spec.name);
    if spec.audit_enabled && link_column == config.audit.user_column {
        return Err(DdlError::reserved_column(&spec.name, link_column));
    }

    for column in spec.column_names() {
        let audit_reserved = spec.audit_enabled
            && (column == config.audit.user_column || column == link_column);
        if GENERATED_COLUMNS.contains(&column) || audit_reserved {
            return Err(DdlError::reserved_column(&spec.name, column));
        }
    }
    Ok(())
}

fn primary_key_columns<'a>(table: &str, fields: &'a [Field]) -> DdlResult<Vec<&'a str>> {
    let columns: Vec<&str> = fields
        .iter()
        .filter(|f| f.is_primary_key())
        .map(Field::name)
        .collect();
    if columns.is_empty() {
        return Err(DdlError::EmptyPrimaryKey {
            table: table.to_string(),
        });
    }
    Ok(columns)
}
