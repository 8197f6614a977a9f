use ddlgram_core::{
    Blueprint, BoundSql, Column, ColumnDefinition, ColumnSpec, ColumnType, Command, CommandName,
    CompileError, DefaultValue, Flavor, Grammar, GrammarConfig, Index, Result, Table, Type,
    Version, View, Wrap,
};
use serde::Serialize;
use tracing::debug;

use crate::{json, queries, version};

const ATTRIBUTE_COMMANDS: [CommandName; 1] = [CommandName::Comment];
const ON_UPDATE_EXTRA: &str = "on update";
const DEFAULT_GENERATED_EXTRA: &str = "default_generated";
const CURRENT_TIMESTAMP: &str = "current_timestamp";

/// DDL and catalogue grammar for MySQL and MariaDB servers.
#[derive(Debug, Clone)]
pub struct MysqlGrammar {
    database: String,
    flavor: Flavor,
    server_version: Option<Version>,
    pub(crate) wrap: Wrap,
}

impl MysqlGrammar {
    #[must_use]
    pub fn new(database: &str, prefix: &str, server_version: &str, flavor: Flavor) -> Self {
        let parsed = version::parse_server_version(server_version);
        if parsed.is_none() && !server_version.is_empty() {
            debug!(
                server_version,
                flavor = %flavor,
                "unparsable server version; assuming direct column renames"
            );
        }

        Self {
            database: database.to_string(),
            flavor,
            server_version: parsed,
            wrap: crate::mysql_wrap(prefix),
        }
    }

    #[must_use]
    pub fn from_config(config: &GrammarConfig) -> Self {
        Self::new(
            &config.database,
            &config.prefix,
            &config.server_version,
            config.flavor,
        )
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    #[must_use]
    pub const fn server_version(&self) -> Option<Version> {
        self.server_version
    }

    #[must_use]
    pub fn wrap(&self) -> &Wrap {
        &self.wrap
    }

    fn get_column(&self, blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        let sql = format!("{} {}", self.wrap.column(column.name()), self.type_sql(column));
        self.add_modifiers(sql, blueprint, column)
    }

    fn get_columns(&self, blueprint: &dyn Blueprint) -> Vec<String> {
        blueprint
            .added_columns()
            .into_iter()
            .map(|column| self.get_column(blueprint, column))
            .collect()
    }

    fn compile_key(&self, blueprint: &dyn Blueprint, command: &Command, kind: &str) -> String {
        let algorithm = command
            .algorithm
            .as_deref()
            .filter(|algorithm| !algorithm.is_empty())
            .map(|algorithm| format!(" using {algorithm}"))
            .unwrap_or_default();

        format!(
            "alter table {} add {kind} {}{algorithm}({})",
            self.wrap.table(blueprint.table_name()),
            self.wrap.column(command.index.as_deref().unwrap_or_default()),
            self.wrap.columnize(&command.columns)
        )
    }

    fn compile_drop_key(&self, blueprint: &dyn Blueprint, command: &Command, kind: &str) -> String {
        format!(
            "alter table {} drop {kind} {}",
            self.wrap.table(blueprint.table_name()),
            self.wrap.column(command.index.as_deref().unwrap_or_default())
        )
    }

    fn schema_or_database<'a>(&'a self, schema: &'a str) -> &'a str {
        if schema.is_empty() {
            &self.database
        } else {
            schema
        }
    }

    fn uses_legacy_rename_column(&self) -> bool {
        self.server_version
            .is_some_and(|version| version::requires_legacy_rename_column(version, self.flavor))
    }

    fn compile_legacy_rename_column(
        &self,
        blueprint: &dyn Blueprint,
        from: &str,
        to: &str,
        columns: &[Column],
    ) -> Result<String> {
        let Some(column) = columns.iter().find(|column| column.name == from) else {
            return Err(CompileError::ColumnNotFound {
                command: CommandName::RenameColumn.to_string(),
                table: blueprint.table_name().to_string(),
                column: from.to_string(),
            }
            .into());
        };

        let mut sql = column.column_type.clone();
        if let Some(collation) = column.collation.as_deref().filter(|value| !value.is_empty()) {
            sql.push_str(" collate ");
            sql.push_str(collation);
        }
        let definition = restated_definition(column);

        Ok(format!(
            "alter table {} change {} {} {}",
            self.wrap.table(blueprint.table_name()),
            self.wrap.column(from),
            self.wrap.column(to),
            self.add_modifiers(sql, blueprint, &definition)
        ))
    }
}

impl Grammar for MysqlGrammar {
    fn attribute_commands(&self) -> &[CommandName] {
        &ATTRIBUTE_COMMANDS
    }

    fn compile_add(&self, blueprint: &dyn Blueprint, command: &mut Command) -> String {
        let Some(column) = command.column.as_deref_mut() else {
            return String::new();
        };
        self.resolve_implicit_defaults(column);

        format!(
            "alter table {} add {}",
            self.wrap.table(blueprint.table_name()),
            self.get_column(blueprint, column)
        )
    }

    fn compile_change(&self, blueprint: &dyn Blueprint, command: &mut Command) -> Vec<String> {
        let Some(column) = command.column.as_deref_mut() else {
            return Vec::new();
        };
        self.resolve_implicit_defaults(column);

        vec![format!(
            "alter table {} modify {}",
            self.wrap.table(blueprint.table_name()),
            self.get_column(blueprint, column)
        )]
    }

    fn compile_comment(&self, _blueprint: &dyn Blueprint, _command: &Command) -> String {
        String::new()
    }

    fn compile_create(&self, blueprint: &mut dyn Blueprint) -> String {
        for column in blueprint.added_columns_mut() {
            self.resolve_implicit_defaults(column);
        }

        let mut columns = self.get_columns(&*blueprint);
        if let Some(primary) = blueprint
            .commands_mut()
            .iter_mut()
            .find(|command| command.name == CommandName::Primary)
        {
            let algorithm = primary
                .algorithm
                .as_deref()
                .filter(|algorithm| !algorithm.is_empty())
                .map(|algorithm| format!("using {algorithm}"))
                .unwrap_or_default();
            columns.push(format!(
                "primary key {algorithm}({})",
                self.wrap.columnize(&primary.columns)
            ));
            primary.should_be_skipped = true;
        }

        format!(
            "create table {} ({})",
            self.wrap.table(blueprint.table_name()),
            columns.join(", ")
        )
    }

    fn compile_default(&self, _blueprint: &dyn Blueprint, _command: &Command) -> String {
        String::new()
    }

    fn compile_drop(&self, blueprint: &dyn Blueprint) -> String {
        format!("drop table {}", self.wrap.table(blueprint.table_name()))
    }

    fn compile_drop_column(&self, blueprint: &dyn Blueprint, command: &Command) -> Vec<String> {
        let columns = self
            .wrap
            .prefix_array("drop", &self.wrap.columns(&command.columns));

        vec![format!(
            "alter table {} {}",
            self.wrap.table(blueprint.table_name()),
            columns.join(", ")
        )]
    }

    fn compile_drop_foreign(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        self.compile_drop_key(blueprint, command, "foreign key")
    }

    fn compile_drop_full_text(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        self.compile_drop_index(blueprint, command)
    }

    fn compile_drop_if_exists(&self, blueprint: &dyn Blueprint) -> String {
        format!(
            "drop table if exists {}",
            self.wrap.table(blueprint.table_name())
        )
    }

    fn compile_drop_index(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        self.compile_drop_key(blueprint, command, "index")
    }

    fn compile_drop_primary(&self, blueprint: &dyn Blueprint, _command: &Command) -> String {
        format!(
            "alter table {} drop primary key",
            self.wrap.table(blueprint.table_name())
        )
    }

    fn compile_drop_unique(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        self.compile_drop_index(blueprint, command)
    }

    fn compile_foreign(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        let mut sql = format!(
            "alter table {} add constraint {} foreign key ({}) references {} ({})",
            self.wrap.table(blueprint.table_name()),
            self.wrap.column(command.index.as_deref().unwrap_or_default()),
            self.wrap.columnize(&command.columns),
            self.wrap.table(command.on.as_deref().unwrap_or_default()),
            self.wrap.columnize(&command.references)
        );
        if let Some(action) = command.on_delete.as_deref().filter(|action| !action.is_empty()) {
            sql.push_str(" on delete ");
            sql.push_str(action);
        }
        if let Some(action) = command.on_update.as_deref().filter(|action| !action.is_empty()) {
            sql.push_str(" on update ");
            sql.push_str(action);
        }

        sql
    }

    fn compile_full_text(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        self.compile_key(blueprint, command, "fulltext")
    }

    fn compile_index(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        self.compile_key(blueprint, command, "index")
    }

    fn compile_primary(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        let algorithm = command
            .algorithm
            .as_deref()
            .filter(|algorithm| !algorithm.is_empty())
            .map(|algorithm| format!("using {algorithm}"))
            .unwrap_or_default();

        format!(
            "alter table {} add primary key {algorithm}({})",
            self.wrap.table(blueprint.table_name()),
            self.wrap.columnize(&command.columns)
        )
    }

    fn compile_rename(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        format!(
            "rename table {} to {}",
            self.wrap.table(blueprint.table_name()),
            self.wrap.table(command.to.as_deref().unwrap_or_default())
        )
    }

    fn compile_rename_column(
        &self,
        blueprint: &dyn Blueprint,
        command: &Command,
        columns: &[Column],
    ) -> Result<String> {
        let from = command.from.as_deref().unwrap_or_default();
        let to = command.to.as_deref().unwrap_or_default();

        if self.uses_legacy_rename_column() {
            debug!(
                table = blueprint.table_name(),
                from,
                to,
                flavor = %self.flavor,
                "server predates rename column; restating column definition"
            );
            return self.compile_legacy_rename_column(blueprint, from, to, columns);
        }

        Ok(format!(
            "alter table {} rename column {} to {}",
            self.wrap.table(blueprint.table_name()),
            self.wrap.column(from),
            self.wrap.column(to)
        ))
    }

    fn compile_rename_index(
        &self,
        blueprint: &dyn Blueprint,
        command: &Command,
        _indexes: &[Index],
    ) -> Vec<String> {
        vec![format!(
            "alter table {} rename index {} to {}",
            self.wrap.table(blueprint.table_name()),
            self.wrap.column(command.from.as_deref().unwrap_or_default()),
            self.wrap.column(command.to.as_deref().unwrap_or_default())
        )]
    }

    fn compile_table_comment(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        format!(
            "alter table {} comment = {}",
            self.wrap.table(blueprint.table_name()),
            self.wrap.quote(command.value.as_deref().unwrap_or_default())
        )
    }

    fn compile_unique(&self, blueprint: &dyn Blueprint, command: &Command) -> String {
        self.compile_key(blueprint, command, "unique")
    }

    fn compile_disable_foreign_key_constraints(&self) -> String {
        queries::DISABLE_FOREIGN_KEY_CHECKS.to_string()
    }

    fn compile_enable_foreign_key_constraints(&self) -> String {
        queries::ENABLE_FOREIGN_KEY_CHECKS.to_string()
    }

    fn compile_drop_all_domains(&self, _domains: &[String]) -> Vec<String> {
        Vec::new()
    }

    fn compile_drop_all_tables(&self, _schema: &str, tables: &[Table]) -> Vec<String> {
        let mut statements = vec![self.compile_disable_foreign_key_constraints()];
        if !tables.is_empty() {
            let names = tables.iter().map(|table| table.name.as_str()).collect::<Vec<_>>();
            statements.push(format!("drop table {}", self.wrap.columnize(&names)));
        }
        statements.push(self.compile_enable_foreign_key_constraints());
        statements
    }

    fn compile_drop_all_types(&self, _schema: &str, _types: &[Type]) -> Vec<String> {
        Vec::new()
    }

    fn compile_drop_all_views(&self, _schema: &str, views: &[View]) -> Vec<String> {
        if views.is_empty() {
            return Vec::new();
        }
        let names = views.iter().map(|view| view.name.as_str()).collect::<Vec<_>>();
        vec![format!("drop view {}", self.wrap.columnize(&names))]
    }

    fn compile_columns(&self, schema: &str, table: &str) -> String {
        let table = format!("{}{table}", self.wrap.prefix());
        queries::columns_query(&self.wrap, self.schema_or_database(schema), &table)
    }

    fn compile_foreign_keys(&self, schema: &str, table: &str) -> String {
        let table = format!("{}{table}", self.wrap.prefix());
        queries::foreign_keys_query(&self.wrap, self.schema_or_database(schema), &table)
    }

    fn compile_indexes(&self, schema: &str, table: &str) -> String {
        let table = format!("{}{table}", self.wrap.prefix());
        queries::indexes_query(&self.wrap, self.schema_or_database(schema), &table)
    }

    fn compile_tables(&self, database: &str) -> String {
        queries::tables_query(&self.wrap, database)
    }

    fn compile_types(&self) -> String {
        String::new()
    }

    fn compile_version(&self) -> String {
        queries::VERSION_QUERY.to_string()
    }

    fn compile_views(&self, database: &str) -> String {
        queries::views_query(&self.wrap, database)
    }

    fn compile_json_contains<T>(&self, column: &str, value: &T, is_not: bool) -> Result<BoundSql>
    where
        T: Serialize + ?Sized,
    {
        json::contains(&self.wrap, column, value, is_not)
    }

    fn compile_json_contains_key(&self, column: &str, is_not: bool) -> String {
        json::contains_key(&self.wrap, column, is_not)
    }

    fn compile_json_length(&self, column: &str) -> String {
        json::length(&self.wrap, column)
    }

    fn compile_json_selector(&self, column: &str) -> String {
        json::selector(&self.wrap, column)
    }

    fn compile_json_values(&self, values: Vec<serde_json::Value>) -> Vec<serde_json::Value> {
        json::values(values)
    }
}

/// Rebuilds a column definition from catalogue metadata so a legacy
/// `change` statement can restate it unchanged.
fn restated_definition(column: &Column) -> ColumnSpec {
    let mut definition = ColumnSpec::new(
        column.name.clone(),
        ColumnType::Custom(column.column_type.clone()),
    );
    definition.auto_increment = column.autoincrement;
    definition.nullable = column.nullable;
    if !column.comment.is_empty() {
        definition.comment = Some(column.comment.clone());
    }
    if let Some(default) = column.default.as_deref().filter(|value| !value.is_empty()) {
        definition.default = Some(restated_default(default, &column.extra));
    }
    if let Some(expression) = on_update_expression(&column.extra) {
        definition.on_update = Some(expression.to_string());
    }
    definition
}

/// `COLUMN_DEFAULT` holds bare string literals on MySQL, quoted ones on
/// MariaDB, and expressions as written.
fn restated_default(default: &str, extra: &str) -> DefaultValue {
    let is_expression = extra.to_ascii_lowercase().contains(DEFAULT_GENERATED_EXTRA)
        || is_current_timestamp(default)
        || default.eq_ignore_ascii_case("null")
        || is_numeric(default)
        || is_quoted_literal(default);

    if is_expression {
        DefaultValue::expression(default)
    } else {
        DefaultValue::string(default)
    }
}

fn is_current_timestamp(default: &str) -> bool {
    let lowered = default.to_ascii_lowercase();
    let Some(precision) = lowered.strip_prefix(CURRENT_TIMESTAMP) else {
        return false;
    };

    precision.is_empty()
        || precision
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .is_some_and(|digits| digits.chars().all(|digit| digit.is_ascii_digit()))
}

fn is_numeric(default: &str) -> bool {
    default.parse::<f64>().is_ok() && default.bytes().any(|byte| byte.is_ascii_digit())
}

fn is_quoted_literal(default: &str) -> bool {
    let literal = default
        .strip_prefix("b'")
        .or_else(|| default.strip_prefix("x'"))
        .or_else(|| default.strip_prefix('\''));
    literal.is_some_and(|rest| rest.ends_with('\''))
}

fn on_update_expression(extra: &str) -> Option<&str> {
    let position = extra.to_ascii_lowercase().find(ON_UPDATE_EXTRA)?;
    let expression = extra[position + ON_UPDATE_EXTRA.len()..].trim();
    (!expression.is_empty()).then_some(expression)
}
