use ddlgram_core::{ColumnType, CommandName, Flavor};
use ddlgram_testkit::load_test_cases_from_str;

#[test]
fn omitted_connection_fields_default_to_mysql() {
    let yaml = r#"
defaults:
  blueprint:
    table: users
  expected: []
"#;

    let cases = load_test_cases_from_str(yaml).expect("yaml must parse");
    let case = cases.get("defaults").expect("named testcase must be present");

    assert_eq!(case.flavor, Flavor::Mysql);
    assert!(case.database.is_empty());
    assert!(case.prefix.is_empty());
    assert!(case.server_version.is_empty());
    assert!(case.columns.is_empty());
    assert_eq!(case.error, None);
}

#[test]
fn preserves_blueprint_and_grammar_config() {
    let yaml = r#"
metadata:
  database: goravel
  prefix: goravel_
  server_version: "10.4.0"
  flavor: mariadb
  blueprint:
    table: users
    commands:
      - name: add
        column:
          name: email
          type: string
          length: 320
  error: boom
"#;

    let cases = load_test_cases_from_str(yaml).expect("yaml must parse");
    let case = cases.get("metadata").expect("named testcase must be present");
    let config = case.grammar_config();

    assert_eq!(config.database, "goravel");
    assert_eq!(config.prefix, "goravel_");
    assert_eq!(config.server_version, "10.4.0");
    assert_eq!(config.flavor, Flavor::MariaDb);
    assert_eq!(case.error.as_deref(), Some("boom"));

    let blueprint = case.blueprint.as_ref().expect("blueprint must be present");
    assert_eq!(blueprint.commands[0].name, CommandName::Add);
    let column = blueprint.commands[0]
        .column
        .as_ref()
        .expect("add command must carry a column");
    assert_eq!(column.column_type, ColumnType::String);
    assert_eq!(column.length, Some(320));
}

#[test]
fn rejects_unknown_fields() {
    let yaml = r#"
typo:
  blueprint:
    table: users
  expect: []
"#;

    let error = load_test_cases_from_str(yaml).expect_err("unknown field must be rejected");
    assert!(
        error.to_string().contains("unknown field `expect`"),
        "unexpected error: {error}"
    );
}
