use ddlgram_core::{
    CatalogueError, Column, DbColumn, DbForeignKey, DbIndex, ForeignKey, Grammar, Index, Processor,
    Result, Table, View,
};
use mysql::{Row, prelude::Queryable};
use tracing::debug;

use crate::{MysqlGrammar, MysqlProcessor, ServerVersion};

/// Runs catalogue queries on a caller-owned connection and normalizes the rows.
pub struct Catalogue<'a, Q> {
    connection: &'a mut Q,
    grammar: &'a MysqlGrammar,
    processor: MysqlProcessor,
}

impl<'a, Q: Queryable> Catalogue<'a, Q> {
    pub fn new(connection: &'a mut Q, grammar: &'a MysqlGrammar) -> Self {
        Self {
            connection,
            grammar,
            processor: MysqlProcessor::new(),
        }
    }

    pub fn server_version(&mut self) -> Result<ServerVersion> {
        let sql = self.grammar.compile_version();
        let row = self
            .connection
            .query_first::<Row, _>(&sql)
            .map_err(|source| CatalogueError::query_failed(&sql, source))?
            .ok_or_else(|| CatalogueError::EmptyResult { sql: sql.clone() })?;

        let detected = ServerVersion::detect(&row_string(&row, "value", &sql)?);
        debug!(version = %detected.version, flavor = %detected.flavor, "detected server version");
        Ok(detected)
    }

    pub fn columns(&mut self, table: &str) -> Result<Vec<Column>> {
        let sql = self.grammar.compile_columns("", table);
        let columns = self
            .query(&sql)?
            .iter()
            .map(|row| {
                Ok(DbColumn {
                    name: row_string(row, "name", &sql)?,
                    type_name: row_string(row, "type_name", &sql)?,
                    column_type: row_string(row, "type", &sql)?,
                    collation: row_value(row, "collation", &sql)?,
                    nullable: row_string(row, "nullable", &sql)?,
                    default: row_value(row, "default", &sql)?,
                    comment: row_string(row, "comment", &sql)?,
                    generation_expression: row_value(row, "expression", &sql)?
                        .filter(|expression| !expression.is_empty()),
                    extra: row_string(row, "extra", &sql)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.processor.process_columns(columns))
    }

    pub fn indexes(&mut self, table: &str) -> Result<Vec<Index>> {
        let sql = self.grammar.compile_indexes("", table);
        let indexes = self
            .query(&sql)?
            .iter()
            .map(|row| {
                Ok(DbIndex {
                    name: row_string(row, "name", &sql)?,
                    columns: row_string(row, "columns", &sql)?,
                    index_type: row_string(row, "type", &sql)?,
                    unique: row_flag(row, "unique", &sql)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.processor.process_indexes(indexes))
    }

    pub fn foreign_keys(&mut self, table: &str) -> Result<Vec<ForeignKey>> {
        let sql = self.grammar.compile_foreign_keys("", table);
        let foreign_keys = self
            .query(&sql)?
            .iter()
            .map(|row| {
                Ok(DbForeignKey {
                    name: row_string(row, "name", &sql)?,
                    columns: row_string(row, "columns", &sql)?,
                    foreign_schema: row_string(row, "foreign_schema", &sql)?,
                    foreign_table: row_string(row, "foreign_table", &sql)?,
                    foreign_columns: row_string(row, "foreign_columns", &sql)?,
                    on_update: row_string(row, "on_update", &sql)?,
                    on_delete: row_string(row, "on_delete", &sql)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.processor.process_foreign_keys(foreign_keys))
    }

    pub fn tables(&mut self) -> Result<Vec<Table>> {
        let database = self.grammar.database().to_string();
        let sql = self.grammar.compile_tables(&database);
        self.query(&sql)?
            .iter()
            .map(|row| {
                Ok(Table {
                    name: row_string(row, "name", &sql)?,
                    schema: database.clone(),
                    size: row_size(row, "size", &sql)?,
                    comment: row_string(row, "comment", &sql)?,
                    engine: row_value(row, "engine", &sql)?,
                    collation: row_value(row, "collation", &sql)?,
                })
            })
            .collect()
    }

    pub fn views(&mut self) -> Result<Vec<View>> {
        let database = self.grammar.database().to_string();
        let sql = self.grammar.compile_views(&database);
        self.query(&sql)?
            .iter()
            .map(|row| {
                Ok(View {
                    name: row_string(row, "name", &sql)?,
                    schema: database.clone(),
                    definition: row_string(row, "definition", &sql)?,
                })
            })
            .collect()
    }

    fn query(&mut self, sql: &str) -> Result<Vec<Row>> {
        let rows = self
            .connection
            .query::<Row, _>(sql)
            .map_err(|source| CatalogueError::query_failed(sql, source))?;
        debug!(rows = rows.len(), "catalogue query returned");
        Ok(rows)
    }
}

fn row_value(row: &Row, label: &str, sql: &str) -> Result<Option<String>> {
    match row.get_opt::<Option<String>, _>(label) {
        Some(Ok(value)) => Ok(value),
        Some(Err(source)) => Err(CatalogueError::query_failed(sql, source).into()),
        None => Err(CatalogueError::MissingColumn {
            sql: sql.to_string(),
            label: label.to_string(),
        }
        .into()),
    }
}

fn row_string(row: &Row, label: &str, sql: &str) -> Result<String> {
    Ok(row_value(row, label, sql)?.unwrap_or_default())
}

fn row_flag(row: &Row, label: &str, sql: &str) -> Result<bool> {
    let raw = row_string(row, label, sql)?;
    parse_flag(&raw).ok_or_else(|| invalid_value(sql, label, raw).into())
}

fn row_size(row: &Row, label: &str, sql: &str) -> Result<u64> {
    let raw = row_string(row, label, sql)?;
    if raw.is_empty() {
        return Ok(0);
    }
    raw.trim()
        .parse::<u64>()
        .map_err(|_| invalid_value(sql, label, raw).into())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" => Some(true),
        "0" | "" => Some(false),
        _ => None,
    }
}

fn invalid_value(sql: &str, label: &str, value: String) -> CatalogueError {
    CatalogueError::InvalidValue {
        sql: sql.to_string(),
        label: label.to_string(),
        value,
    }
}
