use serde::Serialize;

use crate::{Blueprint, BoundSql, Column, Command, CommandName, Index, Result, Table, Type, View};

/// Compiles blueprint commands and catalogue lookups into dialect SQL.
///
/// Statement compilers return `""` or an empty list when a command has no
/// representation in the dialect.
pub trait Grammar: Send + Sync {
    fn attribute_commands(&self) -> &[CommandName];

    fn compile_add(&self, blueprint: &dyn Blueprint, command: &mut Command) -> String;
    fn compile_change(&self, blueprint: &dyn Blueprint, command: &mut Command) -> Vec<String>;
    fn compile_comment(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_create(&self, blueprint: &mut dyn Blueprint) -> String;
    fn compile_default(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_drop(&self, blueprint: &dyn Blueprint) -> String;
    fn compile_drop_column(&self, blueprint: &dyn Blueprint, command: &Command) -> Vec<String>;
    fn compile_drop_foreign(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_drop_full_text(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_drop_if_exists(&self, blueprint: &dyn Blueprint) -> String;
    fn compile_drop_index(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_drop_primary(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_drop_unique(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_foreign(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_full_text(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_index(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_primary(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_rename(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_rename_column(
        &self,
        blueprint: &dyn Blueprint,
        command: &Command,
        columns: &[Column],
    ) -> Result<String>;
    fn compile_rename_index(
        &self,
        blueprint: &dyn Blueprint,
        command: &Command,
        indexes: &[Index],
    ) -> Vec<String>;
    fn compile_table_comment(&self, blueprint: &dyn Blueprint, command: &Command) -> String;
    fn compile_unique(&self, blueprint: &dyn Blueprint, command: &Command) -> String;

    fn compile_disable_foreign_key_constraints(&self) -> String;
    fn compile_enable_foreign_key_constraints(&self) -> String;
    fn compile_drop_all_domains(&self, domains: &[String]) -> Vec<String>;
    fn compile_drop_all_tables(&self, schema: &str, tables: &[Table]) -> Vec<String>;
    fn compile_drop_all_types(&self, schema: &str, types: &[Type]) -> Vec<String>;
    fn compile_drop_all_views(&self, schema: &str, views: &[View]) -> Vec<String>;

    fn compile_columns(&self, schema: &str, table: &str) -> String;
    fn compile_foreign_keys(&self, schema: &str, table: &str) -> String;
    fn compile_indexes(&self, schema: &str, table: &str) -> String;
    fn compile_tables(&self, database: &str) -> String;
    fn compile_types(&self) -> String;
    fn compile_version(&self) -> String;
    fn compile_views(&self, database: &str) -> String;

    fn compile_json_contains<T>(&self, column: &str, value: &T, is_not: bool) -> Result<BoundSql>
    where
        Self: Sized,
        T: Serialize + ?Sized;
    fn compile_json_contains_key(&self, column: &str, is_not: bool) -> String;
    fn compile_json_length(&self, column: &str) -> String;
    fn compile_json_selector(&self, column: &str) -> String;
    fn compile_json_values(&self, values: Vec<serde_json::Value>) -> Vec<serde_json::Value>;
}
