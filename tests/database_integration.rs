//! Integration tests for whole-database rendering.
//!
//! Schema documents are loaded with serde the way an external loader would,
//! then rendered through the generator.

use pretty_assertions::assert_eq;
use sqlgen::prelude::*;
use sqlgen::schema::SchemaError;

const SHOP_JSON: &str = r#"{
    "name": "shop",
    "table_list": [
        {
            "name": "category",
            "field_list": [
                { "name": "title", "type": "VARCHAR(128)", "not_null": true }
            ],
            "comment": "Product categories"
        },
        {
            "name": "widget",
            "audit": true,
            "field_list": [
                { "name": "label", "type": "VARCHAR(64)", "not_null": true },
                { "name": "price", "type": "DECIMAL(10,2)", "default": 0 },
                { "name": "internal_note", "type": "TEXT", "hide_audit": true }
            ],
            "fk_list": [
                { "name": "category_id", "references": "category", "not_null": true }
            ],
            "unique_list": [["label"]],
            "comment": ["Things we sell.", "Prices exclude tax."]
        }
    ]
}"#;

/// Test loading a JSON document with the original keys
#[test]
fn test_json_document() {
    let spec: DatabaseSpec = serde_json::from_str(SHOP_JSON).expect("document should parse");
    let database = MariaDbGenerator::new()
        .database(&spec)
        .expect("database should build");

    let names: Vec<&str> = database.tables().iter().map(Table::name).collect();
    assert_eq!(names, vec!["category", "widget"]);

    let widget = database.table("widget").expect("widget exists");
    assert!(widget.is_audited());
    assert_eq!(widget.comment(), Some("Things we sell.\nPrices exclude tax."));

    let sql = database.to_sql();
    assert!(sql.contains("CREATE SCHEMA IF NOT EXISTS `shop` DEFAULT CHARACTER SET utf8;"));
    assert!(sql.contains("    `price` DECIMAL(10,2) DEFAULT 0,\n"));
    assert!(sql.contains(") Engine=InnoDB COMMENT='Product categories';"));
    assert!(sql.contains("CREATE UNIQUE INDEX `unique_widget_label` ON `shop`.`widget` (`label`);"));
    assert!(sql.contains("DROP INDEX `unique_widget_label` ON `shop`.`audit_widget`;"));
    assert!(sql.contains("CONSTRAINT `fk_audit_widget_category_id`"));
    assert!(!sql.contains("NEW.`internal_note`"));
}

/// Test the section order of a full script
#[test]
fn test_script_order() {
    let spec: DatabaseSpec = serde_json::from_str(SHOP_JSON).expect("document should parse");
    let sql = MariaDbGenerator::new()
        .generate_database(&spec)
        .expect("database should render");

    let position = |needle: &str| {
        sql.find(needle)
            .unwrap_or_else(|| panic!("missing `{needle}`"))
    };
    let order = [
        position("-- Database shop"),
        position("-- Table `shop`.`category`"),
        position("-- Table `shop`.`widget`"),
        position("CREATE UNIQUE INDEX `unique_widget_label`"),
        position("CREATE TRIGGER `widget_before_insert`"),
        position("CREATE TRIGGER `widget_before_update`"),
        position("-- Audit Table for widget"),
        position("CREATE TRIGGER `audit_widget_insert_trigger`"),
        position("CREATE TRIGGER `audit_widget_update_trigger`"),
    ];
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]), "{order:?}");

    // Sections are separated by exactly one blank line.
    assert!(!sql.contains("\n\n\n"));
    assert!(sql.ends_with("DELIMITER ;\n\n"));
}

/// Test the single `table` key alongside `tables`
#[test]
fn test_single_table_key() {
    let spec: DatabaseSpec = serde_json::from_str(
        r#"{
            "name": "crm",
            "create_schema": false,
            "table": { "name": "contact", "field_list": [] },
            "tables": [{ "name": "note", "fields": [{ "name": "body", "type": "TEXT" }] }]
        }"#,
    )
    .expect("document should parse");

    let sql = MariaDbGenerator::new()
        .generate_database(&spec)
        .expect("database should render");
    assert!(!sql.contains("CREATE SCHEMA"));
    assert!(sql.find("`crm`.`contact`") < sql.find("`crm`.`note`"));
}

/// Test loading a TOML document
#[test]
fn test_toml_document() {
    let spec: DatabaseSpec = toml::from_str(
        r#"
        name = "library"

        [[tables]]
        name = "book"
        audit = true

        [[tables.fields]]
        name = "isbn"
        type = "CHAR(13)"
        not_null = true

        [[tables.fields]]
        name = "in_print"
        type = "BOOLEAN"
        default = true

        [[tables.foreign_keys]]
        name = "publisher_id"
        references = "publisher"
        database = "catalog"
        "#,
    )
    .expect("document should parse");

    let sql = MariaDbGenerator::new()
        .generate_database(&spec)
        .expect("database should render");
    assert!(sql.contains("    `in_print` BOOLEAN DEFAULT TRUE,\n"));
    assert!(sql.contains("REFERENCES `catalog`.`publisher` (`id`)"));
    assert!(sql.contains("CONSTRAINT `fk_audit_book_publisher_id`"));
}

/// Test a document without a field list is rejected
#[test]
fn test_missing_field_list() {
    let result = serde_json::from_str::<DatabaseSpec>(r#"{"name": "shop", "tables": [{"name": "widget"}]}"#);
    assert!(result.is_err());
}

/// Test a foreign key without a referenced table is rejected
#[test]
fn test_missing_reference() {
    let result = serde_json::from_str::<TableSpec>(
        r#"{"name": "widget", "fields": [], "fk_list": [{"name": "category_id"}]}"#,
    );
    assert!(result.is_err());
}

/// Test validation collects every problem
#[test]
fn test_validation_reports_all_problems() {
    let spec = DatabaseSpec::new("shop")
        .with_table(TableSpec::new("widget").field(FieldSpec::new("a`b")))
        .with_table(TableSpec::new("widget"));

    let err = MariaDbGenerator::new().database(&spec).unwrap_err();
    match err {
        DdlError::Schema(SchemaError::ValidationFailed { count, .. }) => assert_eq!(count, 2),
        other => panic!("unexpected error: {other}"),
    }
}

/// Test several databases share one schema registry
#[test]
fn test_generate_all() {
    let generator = MariaDbGenerator::new();
    let shop: DatabaseSpec = serde_json::from_str(SHOP_JSON).expect("document should parse");
    let more = DatabaseSpec::new("shop").with_table(TableSpec::new("tag"));

    let sql = generator
        .generate_all([&shop, &more])
        .expect("databases should render");
    assert_eq!(sql.matches("CREATE SCHEMA IF NOT EXISTS `shop`").count(), 1);
    assert!(sql.contains("-- Table `shop`.`tag`"));

    // Rendering each database on its own repeats the preamble.
    let separate = [&shop, &more]
        .into_iter()
        .map(|spec| generator.generate_database(spec).expect("database should render"))
        .collect::<String>();
    assert_eq!(separate.matches("CREATE SCHEMA IF NOT EXISTS `shop`").count(), 2);
}
