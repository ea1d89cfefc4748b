//! Integration tests for table rendering.
//!
//! These tests render complete tables through the public API and check the
//! generated script, including the audit mirror and long identifier handling.

use pretty_assertions::assert_eq;
use sqlgen::mariadb::identifier::name_digest;
use sqlgen::mariadb::writer::BANNER_RULE;
use sqlgen::prelude::*;

const LONG_TABLE: &str = "inventory_adjustment_reconciliation_snapshot_by_warehouse_and_supplier";

fn widget(audit: bool) -> TableSpec {
    TableSpec::new("widget")
        .in_database("shop")
        .audit(audit)
        .field(FieldSpec::new("label").sql_type("VARCHAR(64)").not_null())
}

/// Test the plain table output, byte for byte
#[test]
fn test_widget_without_audit() {
    let sql = MariaDbGenerator::new()
        .generate_table(&widget(false))
        .expect("widget should render");

    let expected = format!(
        r"{BANNER_RULE}
-- Table `shop`.`widget`
{BANNER_RULE}

CREATE TABLE IF NOT EXISTS `shop`.`widget` (
    `id` INT UNSIGNED NOT NULL AUTO_INCREMENT,
    `label` VARCHAR(64) NOT NULL,
    `active` BOOLEAN NOT NULL DEFAULT 1,
    `create_by` VARCHAR(32) NOT NULL,
    `create_time` TIMESTAMP(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    `update_by` VARCHAR(32) NOT NULL,
    `update_time` TIMESTAMP(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    PRIMARY KEY (`id`)
) Engine=InnoDB;

CREATE TRIGGER `widget_before_insert` BEFORE INSERT ON `shop`.`widget`
FOR EACH ROW
    SET NEW.`create_by` = CURRENT_USER(),
        NEW.`update_by` = CURRENT_USER();

CREATE TRIGGER `widget_before_update` BEFORE UPDATE ON `shop`.`widget`
FOR EACH ROW
    SET NEW.`update_by` = CURRENT_USER(),
        NEW.`update_time` = CURRENT_TIMESTAMP(3);

"
    );

    assert_eq!(sql, expected);
    assert!(!sql.contains("audit_widget"));
}

/// Test the audited table adds the mirror section
#[test]
fn test_widget_with_audit() {
    let sql = MariaDbGenerator::new()
        .generate_table(&widget(true))
        .expect("audited widget should render");

    assert!(sql.contains("CREATE TABLE IF NOT EXISTS `shop`.`audit_widget` LIKE `shop`.`widget`;"));
    assert!(sql.contains(
        "ALTER TABLE `shop`.`audit_widget` ADD COLUMN `widget_id` INT UNSIGNED NOT NULL AFTER `id`;"
    ));
    assert!(sql.contains("CREATE TRIGGER `audit_widget_insert_trigger` AFTER INSERT ON `shop`.`widget`"));
    assert!(sql.contains("CREATE TRIGGER `audit_widget_update_trigger` AFTER UPDATE ON `shop`.`widget`"));

    // The audit user key is a regular column of the main table.
    assert!(sql.contains("    `who_id` INT UNSIGNED NOT NULL,\n"));
    assert!(sql.contains("CONSTRAINT `fk_widget_who_id`"));
    assert!(sql.contains("REFERENCES `shop`.`user` (`id`)"));
}

/// Test the audit trigger body exactly
#[test]
fn test_audit_trigger_body() {
    let table = Table::from_spec(&widget(true)).expect("audited widget should build");
    let [insert, _] = table.audit().expect("auditing is enabled").triggers();

    assert_eq!(
        insert.to_sql(),
        r"DELIMITER //
CREATE TRIGGER `audit_widget_insert_trigger` AFTER INSERT ON `shop`.`widget`
FOR EACH ROW
BEGIN
    INSERT INTO `shop`.`audit_widget` (
        `widget_id`,
        `label`,
        `active`,
        `create_by`,
        `update_by`,
        `who_id`
    ) VALUES (
        NEW.`id`,
        NEW.`label`,
        NEW.`active`,
        NEW.`create_by`,
        NEW.`update_by`,
        NEW.`who_id`
    );
END;//
DELIMITER ;"
    );
}

/// Test both audit triggers copy the same columns in the same order
#[test]
fn test_audit_triggers_are_symmetric() {
    let spec = widget(true)
        .field(FieldSpec::new("secret").sql_type("TEXT").hidden_from_audit())
        .foreign_key(ForeignKeySpec::new("category_id", "category"));
    let table = Table::from_spec(&spec).expect("widget should build");
    let [insert, update] = table.audit().expect("auditing is enabled").triggers();

    let body = |sql: String| sql.split_once("BEGIN").map(|(_, body)| body.to_string());
    assert_eq!(body(insert.to_sql()), body(update.to_sql()));
    assert!(!insert.to_sql().contains("secret"));
    assert!(insert.to_sql().contains("NEW.`category_id`"));
}

/// Test a long table name wraps index names identically in both places
#[test]
fn test_long_table_unique_index() {
    let spec = TableSpec::new(LONG_TABLE)
        .in_database("warehouse")
        .audit(true)
        .field(FieldSpec::new("sku").sql_type("VARCHAR(32)").not_null())
        .unique(["sku"]);
    let table = Table::from_spec(&spec).expect("long table should build");

    let index = format!(
        "{}{}",
        &format!("unique_{LONG_TABLE}_sku")[..32],
        name_digest(&format!("unique_{LONG_TABLE}_sku"))
    );
    assert_eq!(index, "unique_inventory_adjustment_reco385b64d81bf24e7da6a8604ea6bf2049");
    assert_eq!(table.unique_index_name(&spec.unique_constraints[0]), index);

    let sql = table.to_sql();
    assert!(sql.contains(&format!(
        "CREATE UNIQUE INDEX `{index}` ON `warehouse`.`{LONG_TABLE}` (`sku`);"
    )));
    assert!(sql.contains(&format!(
        "DROP INDEX `{index}` ON `warehouse`.`audit_{LONG_TABLE}`;"
    )));
}

/// Test every generated identifier stays within the limit
#[test]
fn test_long_table_identifiers_fit() {
    let spec = TableSpec::new(LONG_TABLE)
        .in_database("warehouse")
        .audit(true)
        .foreign_key(ForeignKeySpec::new("supplier_id", "supplier"));
    let sql = MariaDbGenerator::new()
        .generate_table(&spec)
        .expect("long table should render");

    for line in sql.lines() {
        let line = line.trim_start();
        let name = line
            .strip_prefix("CONSTRAINT `")
            .or_else(|| line.strip_prefix("CREATE TRIGGER `"))
            .and_then(|rest| rest.split('`').next());
        if let Some(name) = name {
            assert!(name.chars().count() <= 64, "identifier too long: {name}");
        }
    }

    let link = format!("fk_audit_{LONG_TABLE}_{LONG_TABLE}_id");
    assert!(sql.contains(&format!("{}{}", &link[..32], name_digest(&link))));
}

/// Test rendering twice yields the same script
#[test]
fn test_render_is_deterministic() {
    let generator = MariaDbGenerator::new();
    let spec = widget(true).unique(["label"]);

    let first = generator.generate_table(&spec).expect("widget should render");
    let second = generator.generate_table(&spec).expect("widget should render");
    assert_eq!(first, second);
}

/// Test foreign keys in another database
#[test]
fn test_cross_database_foreign_key() {
    let spec = widget(false)
        .foreign_key(ForeignKeySpec::new("owner_id", "account").in_database("crm").not_null());
    let sql = MariaDbGenerator::new()
        .generate_table(&spec)
        .expect("widget should render");

    assert!(sql.contains("REFERENCES `crm`.`account` (`id`)"));
}

/// Test invalid descriptions fail before anything is rendered
#[test]
fn test_invalid_table() {
    let generator = MariaDbGenerator::new();

    let err = generator
        .generate_table(&widget(false).field(FieldSpec::new("label")))
        .unwrap_err();
    assert!(err.is_validation());

    let err = generator
        .generate_table(&widget(false).field(FieldSpec::new("update_time")))
        .unwrap_err();
    assert!(matches!(err, DdlError::ReservedColumn { .. }));
    assert_eq!(
        err.to_string(),
        "column `widget.update_time` collides with a generated column"
    );
}

/// Test a multi-line field comment survives layout unchanged
#[test]
fn test_multiline_field_comment() {
    let spec = widget(false).field(
        FieldSpec::new("note")
            .sql_type("TEXT")
            .comment("line one\nline two"),
    );
    let sql = MariaDbGenerator::new()
        .generate_table(&spec)
        .expect("widget should render");

    assert!(sql.contains("    `note` TEXT COMMENT 'line one\nline two',\n"));
}

/// Test a table whose link column would shadow the audit user column
#[test]
fn test_audit_link_column_collision() {
    let spec = TableSpec::new("who").in_database("shop").audit(true);
    let err = MariaDbGenerator::new().generate_table(&spec).unwrap_err();

    assert!(matches!(err, DdlError::ReservedColumn { ref column, .. } if column == "who_id"));
}
