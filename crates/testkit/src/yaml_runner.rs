use std::collections::BTreeMap;

use ddlgram_core::{
    BlueprintSpec, Column, Flavor, Grammar, GrammarConfig, Index, TableBlueprint,
};
use serde::Deserialize;

/// One compile case: a blueprint, the catalogue state it is compiled
/// against, and either the expected statements or the expected error.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestCase {
    pub database: String,
    pub prefix: String,
    pub server_version: String,
    pub flavor: Flavor,
    pub blueprint: Option<BlueprintSpec>,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub expected: Option<Vec<String>>,
    pub error: Option<String>,
}

impl TestCase {
    #[must_use]
    pub fn grammar_config(&self) -> GrammarConfig {
        GrammarConfig {
            database: self.database.clone(),
            prefix: self.prefix.clone(),
            server_version: self.server_version.clone(),
            flavor: self.flavor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed(String),
}

pub fn load_test_cases_from_str(yaml: &str) -> Result<BTreeMap<String, TestCase>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Builds a grammar from the case's configuration and checks the compiled
/// statements against the expectation.
pub fn run_compile_test<F>(grammar_for: F, test: &TestCase) -> TestResult
where
    F: Fn(&GrammarConfig) -> Box<dyn Grammar>,
{
    match run_compile_test_flow(&grammar_for, test) {
        Ok(()) => TestResult::Passed,
        Err(message) => TestResult::Failed(message),
    }
}

fn run_compile_test_flow<F>(grammar_for: &F, test: &TestCase) -> Result<(), String>
where
    F: Fn(&GrammarConfig) -> Box<dyn Grammar>,
{
    validate_expectations(test)?;
    let Some(spec) = test.blueprint.clone() else {
        return Err("testcase is missing `blueprint`".to_string());
    };

    let grammar = grammar_for(&test.grammar_config());
    let mut blueprint = TableBlueprint::from(spec);
    let compiled = blueprint.to_sql(grammar.as_ref(), &test.columns, &test.indexes);

    match (compiled, test.error.as_deref()) {
        (Ok(statements), None) => assert_expected_sql(test.expected.as_deref(), &statements),
        (Ok(statements), Some(expected_error)) => Err(format!(
            "expected error: {expected_error}, but compiled:\n{}",
            statements.join("\n")
        )),
        (Err(actual_error), Some(expected_error)) => {
            let actual_error = actual_error.to_string();
            if actual_error == expected_error {
                Ok(())
            } else {
                Err(format!(
                    "expected error: {expected_error}, but got: {actual_error}"
                ))
            }
        }
        (Err(actual_error), None) => Err(actual_error.to_string()),
    }
}

fn validate_expectations(test: &TestCase) -> Result<(), String> {
    match (&test.expected, &test.error) {
        (Some(_), Some(_)) => Err("`expected` and `error` are mutually exclusive".to_string()),
        (None, None) => Err("testcase must set `expected` or `error`".to_string()),
        _ => Ok(()),
    }
}

fn assert_expected_sql(expected: Option<&[String]>, actual: &[String]) -> Result<(), String> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let matches = expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(expected, actual)| normalize_sql(expected) == normalize_sql(actual));
    if matches {
        return Ok(());
    }

    Err(format!(
        "SQL mismatch; expected:\n{}\nactual:\n{}",
        expected.join("\n"),
        actual.join("\n")
    ))
}

fn normalize_sql(sql: &str) -> &str {
    sql.trim()
}
