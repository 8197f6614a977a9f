mod blueprint;
mod catalogue;
mod config;
mod error;
mod grammar;
mod processor;
mod schema;
mod statement;
mod wrap;

pub use blueprint::{BlueprintSpec, ColumnSpec, CommandSpec, TableBlueprint};
pub use catalogue::{
    Column, DbColumn, DbForeignKey, DbIndex, ForeignKey, Index, Table, Type, View,
};
pub use config::{Flavor, GrammarConfig, Version};
pub use error::{CatalogueError, CompileError, Error, Result};
pub use grammar::Grammar;
pub use processor::Processor;
pub use schema::{Blueprint, ColumnDefinition, ColumnType, Command, CommandName, DefaultValue};
pub use statement::BoundSql;
pub use wrap::Wrap;
