//! Row-level trigger definitions.
//!
//! Two shapes are rendered:
//!
//! - a single `SET NEW.col = expr, ...` statement, used by the stamping
//!   triggers every table gets;
//! - a `BEGIN ... END` block wrapped in `DELIMITER //`, used by the audit
//!   mirror.

use crate::identifier::{quote, wrap_name};
use crate::writer::{INDENT, SqlWriter, indent};

/// When the trigger fires relative to the triggering event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerTiming {
    /// Fire before the row is written (can modify NEW).
    Before,
    /// Fire after the row is written.
    After,
}

impl TriggerTiming {
    /// Convert to SQL keyword.
    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
        }
    }
}

/// The DML event that fires the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// INSERT operation.
    Insert,
    /// UPDATE operation.
    Update,
}

impl TriggerEvent {
    /// Convert to SQL keyword.
    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
        }
    }

    /// Lowercase form used in generated trigger names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
        }
    }
}

/// What the trigger does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    /// `SET NEW.`column` = expression` for each pair.
    SetNew(Vec<(String, String)>),
    /// Statements run inside `BEGIN ... END`, without trailing semicolons.
    Block(Vec<String>),
}

/// A `FOR EACH ROW` trigger on one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Trigger name, before length wrapping.
    pub name: String,
    /// Timing.
    pub timing: TriggerTiming,
    /// Event.
    pub event: TriggerEvent,
    /// Qualified table the trigger is attached to.
    pub table: String,
    /// Body.
    pub action: TriggerAction,
}

impl Trigger {
    /// Create a trigger.
    pub fn new(
        name: impl Into<String>,
        timing: TriggerTiming,
        event: TriggerEvent,
        table: impl Into<String>,
        action: TriggerAction,
    ) -> Self {
        Self {
            name: name.into(),
            timing,
            event,
            table: table.into(),
            action,
        }
    }

    /// Name as it appears in SQL, wrapped to the identifier limit.
    pub fn sql_name(&self) -> String {
        wrap_name(&self.name).into_owned()
    }

    /// Generate the `CREATE TRIGGER` statement, without a trailing newline.
    pub fn to_sql(&self) -> String {
        let header = format!(
            "CREATE TRIGGER {} {} {} ON {}\nFOR EACH ROW",
            quote(&self.sql_name()),
            self.timing.to_sql(),
            self.event.to_sql(),
            self.table
        );

        match &self.action {
            TriggerAction::SetNew(assignments) => {
                let assignments: Vec<String> = assignments
                    .iter()
                    .map(|(column, expr)| format!("NEW.{} = {}", quote(column), expr))
                    .collect();
                format!(
                    "{header}\n{INDENT}SET {};",
                    assignments.join(&format!(",\n{INDENT}{INDENT}"))
                )
            }
            TriggerAction::Block(statements) => {
                let mut writer = SqlWriter::new();
                writer.line("DELIMITER //");
                writer.line(&header);
                writer.line("BEGIN");
                for statement in statements {
                    writer.line(format!("{};", indent(statement, 1)));
                }
                writer.line("END;//");
                writer.append("DELIMITER ;");
                writer.finish()
            }
        }
    }
}
