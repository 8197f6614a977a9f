use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Blueprint, Column, ColumnDefinition, ColumnType, Command, CommandName, DefaultValue, Grammar,
    Index, Result,
};

/// Concrete column builder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub total: Option<u32>,
    pub places: Option<u32>,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
    pub auto_increment: bool,
    pub unsigned: bool,
    pub comment: Option<String>,
    pub allowed: Vec<String>,
    pub on_update: Option<String>,
    pub after: Option<String>,
    pub first: bool,
    pub use_current: bool,
    pub use_current_on_update: bool,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    #[must_use]
    pub fn with_total_and_places(mut self, total: u32, places: u32) -> Self {
        self.total = Some(total);
        self.places = Some(places);
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    #[must_use]
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_allowed<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = allowed.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_on_update(mut self, expression: impl Into<String>) -> Self {
        self.on_update = Some(expression.into());
        self
    }

    #[must_use]
    pub fn with_after(mut self, column: impl Into<String>) -> Self {
        self.after = Some(column.into());
        self
    }

    #[must_use]
    pub fn first(mut self) -> Self {
        self.first = true;
        self
    }

    #[must_use]
    pub fn use_current(mut self) -> Self {
        self.use_current = true;
        self
    }

    #[must_use]
    pub fn use_current_on_update(mut self) -> Self {
        self.use_current_on_update = true;
        self
    }
}

impl ColumnDefinition for ColumnSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn column_type(&self) -> ColumnType {
        self.column_type.clone()
    }

    fn length(&self) -> Option<u32> {
        self.length
    }

    fn precision(&self) -> Option<u32> {
        self.precision
    }

    fn total(&self) -> Option<u32> {
        self.total
    }

    fn places(&self) -> Option<u32> {
        self.places
    }

    fn is_nullable(&self) -> bool {
        self.nullable
    }

    fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    fn allowed(&self) -> &[String] {
        &self.allowed
    }

    fn on_update(&self) -> Option<&str> {
        self.on_update.as_deref().filter(|expression| !expression.is_empty())
    }

    fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    fn is_first(&self) -> bool {
        self.first
    }

    fn uses_current(&self) -> bool {
        self.use_current
    }

    fn uses_current_on_update(&self) -> bool {
        self.use_current_on_update
    }

    fn set_default(&mut self, value: DefaultValue) {
        self.default = Some(value);
    }

    fn set_on_update(&mut self, expression: String) {
        self.on_update = Some(expression);
    }
}

/// In-memory blueprint for one table, in create or alter mode.
#[derive(Debug)]
pub struct TableBlueprint {
    table: String,
    columns: Vec<ColumnSpec>,
    commands: Vec<Command>,
}

impl TableBlueprint {
    #[must_use]
    pub fn create(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            commands: vec![Command::new(CommandName::Create)],
        }
    }

    #[must_use]
    pub fn alter(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn creating(&self) -> bool {
        self.has_command(CommandName::Create)
    }

    /// Adds a column to the create statement, or an `add` command when altering.
    pub fn column(&mut self, column: ColumnSpec) -> &mut Self {
        if self.creating() {
            self.columns.push(column);
        } else {
            self.commands
                .push(Command::new(CommandName::Add).with_column(column));
        }
        self
    }

    pub fn change(&mut self, column: ColumnSpec) -> &mut Self {
        self.push(Command::new(CommandName::Change).with_column(column))
    }

    pub fn push(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn primary<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Command::new(CommandName::Primary).with_columns(columns))
    }

    pub fn index<I, S>(&mut self, name: impl Into<String>, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(
            Command::new(CommandName::Index)
                .with_index(name)
                .with_columns(columns),
        )
    }

    pub fn unique<I, S>(&mut self, name: impl Into<String>, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(
            Command::new(CommandName::Unique)
                .with_index(name)
                .with_columns(columns),
        )
    }

    pub fn drop_column<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Command::new(CommandName::DropColumn).with_columns(columns))
    }

    pub fn rename_column(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.push(Command::new(CommandName::RenameColumn).with_from_to(from, to))
    }

    pub fn rename(&mut self, to: impl Into<String>) -> &mut Self {
        self.push(Command::new(CommandName::Rename).with_to(to))
    }

    pub fn comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.push(Command::new(CommandName::TableComment).with_value(comment))
    }

    /// Compiles every command in order. `columns` and `indexes` are the
    /// table's current catalogue state, needed by renames on older servers.
    pub fn to_sql(
        &mut self,
        grammar: &dyn Grammar,
        columns: &[Column],
        indexes: &[Index],
    ) -> Result<Vec<String>> {
        let mut statements = Vec::new();

        for position in 0..self.commands.len() {
            if self.commands[position].should_be_skipped {
                continue;
            }

            let name = self.commands[position].name;
            let compiled = if name == CommandName::Create {
                vec![grammar.compile_create(self)]
            } else {
                let mut command =
                    std::mem::replace(&mut self.commands[position], Command::new(name));
                let compiled = self.compile_command(grammar, &mut command, columns, indexes);
                self.commands[position] = command;
                compiled?
            };

            for sql in compiled.into_iter().filter(|sql| !sql.is_empty()) {
                trace!(table = %self.table, command = %name, sql = %sql, "compiled statement");
                statements.push(sql);
            }
        }

        Ok(statements)
    }

    fn compile_command(
        &self,
        grammar: &dyn Grammar,
        command: &mut Command,
        columns: &[Column],
        indexes: &[Index],
    ) -> Result<Vec<String>> {
        let statements = match command.name {
            CommandName::Add => vec![grammar.compile_add(self, command)],
            CommandName::Change => grammar.compile_change(self, command),
            CommandName::Comment => vec![grammar.compile_comment(self, command)],
            CommandName::Create => vec![],
            CommandName::Drop => vec![grammar.compile_drop(self)],
            CommandName::DropColumn => grammar.compile_drop_column(self, command),
            CommandName::DropForeign => vec![grammar.compile_drop_foreign(self, command)],
            CommandName::DropFullText => vec![grammar.compile_drop_full_text(self, command)],
            CommandName::DropIfExists => vec![grammar.compile_drop_if_exists(self)],
            CommandName::DropIndex => vec![grammar.compile_drop_index(self, command)],
            CommandName::DropPrimary => vec![grammar.compile_drop_primary(self, command)],
            CommandName::DropUnique => vec![grammar.compile_drop_unique(self, command)],
            CommandName::Foreign => vec![grammar.compile_foreign(self, command)],
            CommandName::FullText => vec![grammar.compile_full_text(self, command)],
            CommandName::Index => vec![grammar.compile_index(self, command)],
            CommandName::Primary => vec![grammar.compile_primary(self, command)],
            CommandName::Rename => vec![grammar.compile_rename(self, command)],
            CommandName::RenameColumn => {
                vec![grammar.compile_rename_column(self, command, columns)?]
            }
            CommandName::RenameIndex => grammar.compile_rename_index(self, command, indexes),
            CommandName::TableComment => vec![grammar.compile_table_comment(self, command)],
            CommandName::Unique => vec![grammar.compile_unique(self, command)],
        };

        Ok(statements)
    }
}

impl Blueprint for TableBlueprint {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn commands_mut(&mut self) -> &mut [Command] {
        &mut self.commands
    }

    fn added_columns(&self) -> Vec<&dyn ColumnDefinition> {
        self.columns
            .iter()
            .map(|column| column as &dyn ColumnDefinition)
            .collect()
    }

    fn added_columns_mut(&mut self) -> Vec<&mut dyn ColumnDefinition> {
        self.columns
            .iter_mut()
            .map(|column| column as &mut dyn ColumnDefinition)
            .collect()
    }
}

/// Document form of a [`TableBlueprint`], as read from YAML files.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BlueprintSpec {
    pub table: String,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub name: CommandName,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub column: Option<ColumnSpec>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub on: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub on_delete: Option<String>,
    #[serde(default)]
    pub on_update: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl From<CommandSpec> for Command {
    fn from(spec: CommandSpec) -> Self {
        let mut command = Command::new(spec.name);
        command.algorithm = spec.algorithm;
        command.column = spec
            .column
            .map(|column| Box::new(column) as Box<dyn ColumnDefinition>);
        command.columns = spec.columns;
        command.from = spec.from;
        command.to = spec.to;
        command.index = spec.index;
        command.on = spec.on;
        command.references = spec.references;
        command.on_delete = spec.on_delete;
        command.on_update = spec.on_update;
        command.value = spec.value;
        command
    }
}

impl From<BlueprintSpec> for TableBlueprint {
    fn from(spec: BlueprintSpec) -> Self {
        let mut blueprint = if spec.create {
            Self::create(spec.table)
        } else {
            Self::alter(spec.table)
        };
        for column in spec.columns {
            blueprint.column(column);
        }
        for command in spec.commands {
            blueprint.push(command.into());
        }
        blueprint
    }
}
