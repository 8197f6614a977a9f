use ddlgram_core::{BoundSql, CompileError, Result, Wrap};
use serde::Serialize;
use serde_json::Value;

pub(crate) fn contains<T>(wrap: &Wrap, column: &str, value: &T, is_not: bool) -> Result<BoundSql>
where
    T: Serialize + ?Sized,
{
    let (field, path) = wrap.json_field_and_path(column);
    let binding = serde_json::to_string(value).map_err(|source| CompileError::JsonSerialization {
        column: column.to_string(),
        source: Box::new(source),
    })?;

    Ok(BoundSql::new(
        wrap.not(&format!("json_contains({field}, ?{path})"), is_not),
        vec![binding],
    ))
}

pub(crate) fn contains_key(wrap: &Wrap, column: &str, is_not: bool) -> String {
    let (field, path) = wrap.json_field_and_path(column);
    wrap.not(
        &format!("ifnull(json_contains_path({field}, 'one'{path}), 0)"),
        is_not,
    )
}

pub(crate) fn length(wrap: &Wrap, column: &str) -> String {
    let (field, path) = wrap.json_field_and_path(column);
    format!("json_length({field}{path})")
}

pub(crate) fn selector(wrap: &Wrap, column: &str) -> String {
    let (field, path) = wrap.json_field_and_path(column);
    format!("json_unquote(json_extract({field}{path}))")
}

/// Booleans are compared as the strings `true` and `false`.
pub(crate) fn values(values: Vec<Value>) -> Vec<Value> {
    values.into_iter().map(value).collect()
}

fn value(value: Value) -> Value {
    match value {
        Value::Bool(flag) => Value::String(flag.to_string()),
        Value::Array(items) => Value::Array(values(items)),
        other => other,
    }
}
