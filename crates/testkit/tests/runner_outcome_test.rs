use ddlgram_core::{Grammar, GrammarConfig};
use ddlgram_dialect_mysql::MysqlGrammar;
use ddlgram_testkit::{TestCase, TestResult, load_test_cases_from_str, run_compile_test};

#[test]
fn reports_sql_mismatch_with_both_sides() {
    let case = single_case(
        r#"
mismatch:
  blueprint:
    table: users
    commands:
      - name: drop
  expected:
    - drop table `people`
"#,
    );

    let TestResult::Failed(message) = run_compile_test(mysql_grammar, &case) else {
        panic!("mismatched SQL must fail");
    };
    assert!(message.contains("SQL mismatch"), "unexpected message: {message}");
    assert!(message.contains("drop table `people`"), "unexpected message: {message}");
    assert!(message.contains("drop table `users`"), "unexpected message: {message}");
}

#[test]
fn expected_sql_ignores_surrounding_whitespace() {
    let case = single_case(
        r#"
trimmed:
  blueprint:
    table: users
    commands:
      - name: drop_if_exists
  expected:
    - "  drop table if exists `users`  "
"#,
    );

    assert_eq!(run_compile_test(mysql_grammar, &case), TestResult::Passed);
}

#[test]
fn expected_error_without_error_fails() {
    let case = single_case(
        r#"
missing_error:
  blueprint:
    table: users
    commands:
      - name: drop
  error: boom
"#,
    );

    let TestResult::Failed(message) = run_compile_test(mysql_grammar, &case) else {
        panic!("compiled output must not satisfy an expected error");
    };
    assert!(message.starts_with("expected error: boom"), "unexpected message: {message}");
}

#[test]
fn different_error_text_fails() {
    let case = single_case(
        r#"
other_error:
  server_version: "5.7.0"
  blueprint:
    table: users
    commands:
      - name: rename_column
        from: before
        to: after
  error: boom
"#,
    );

    let TestResult::Failed(message) = run_compile_test(mysql_grammar, &case) else {
        panic!("a different error must fail");
    };
    assert!(
        message.contains("but got: compile rename_column on `users` failed"),
        "unexpected message: {message}"
    );
}

#[test]
fn missing_blueprint_or_expectation_fails() {
    let case = TestCase {
        expected: Some(Vec::new()),
        ..TestCase::default()
    };
    assert_eq!(
        run_compile_test(mysql_grammar, &case),
        TestResult::Failed("testcase is missing `blueprint`".to_string())
    );

    let case = single_case(
        r#"
no_expectation:
  blueprint:
    table: users
"#,
    );
    assert_eq!(
        run_compile_test(mysql_grammar, &case),
        TestResult::Failed("testcase must set `expected` or `error`".to_string())
    );
}

fn single_case(yaml: &str) -> TestCase {
    load_test_cases_from_str(yaml)
        .expect("yaml must parse")
        .into_values()
        .next()
        .expect("yaml must contain one testcase")
}

fn mysql_grammar(config: &GrammarConfig) -> Box<dyn Grammar> {
    Box::new(MysqlGrammar::from_config(config))
}
