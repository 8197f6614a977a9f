use std::error::Error as StdError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("compile {command} on `{table}` failed: column `{column}` does not exist")]
    ColumnNotFound {
        command: String,
        table: String,
        column: String,
    },
    #[error("compile json binding for `{column}` failed: {source}")]
    JsonSerialization {
        column: String,
        #[source]
        source: BoxedError,
    },
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("catalogue query failed: {source}; sql={sql}")]
    QueryFailed {
        sql: String,
        #[source]
        source: BoxedError,
    },
    #[error("catalogue query returned no rows; sql={sql}")]
    EmptyResult { sql: String },
    #[error("catalogue row is missing `{label}`; sql={sql}")]
    MissingColumn { sql: String, label: String },
    #[error("catalogue value `{value}` in `{label}` is invalid; sql={sql}")]
    InvalidValue {
        sql: String,
        label: String,
        value: String,
    },
}

impl CatalogueError {
    pub fn query_failed<E>(sql: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::QueryFailed {
            sql: sql.into(),
            source: Box::new(source),
        }
    }
}
