use ddlgram_core::{Blueprint, ColumnDefinition, ColumnType, CommandName};

use crate::MysqlGrammar;

pub type ModifierFn = fn(&MysqlGrammar, &dyn Blueprint, &dyn ColumnDefinition) -> String;

/// One optional clause appended to a column definition.
#[derive(Clone, Copy)]
pub struct Modifier {
    pub name: &'static str,
    pub apply: ModifierFn,
}

/// Column clauses in output order.
pub const MODIFIERS: [Modifier; 8] = [
    Modifier {
        name: "unsigned",
        apply: MysqlGrammar::modify_unsigned,
    },
    Modifier {
        name: "nullable",
        apply: MysqlGrammar::modify_nullable,
    },
    Modifier {
        name: "default",
        apply: MysqlGrammar::modify_default,
    },
    Modifier {
        name: "on_update",
        apply: MysqlGrammar::modify_on_update,
    },
    Modifier {
        name: "increment",
        apply: MysqlGrammar::modify_increment,
    },
    Modifier {
        name: "comment",
        apply: MysqlGrammar::modify_comment,
    },
    Modifier {
        name: "after",
        apply: MysqlGrammar::modify_after,
    },
    Modifier {
        name: "first",
        apply: MysqlGrammar::modify_first,
    },
];

impl MysqlGrammar {
    pub(crate) fn add_modifiers(
        &self,
        mut sql: String,
        blueprint: &dyn Blueprint,
        column: &dyn ColumnDefinition,
    ) -> String {
        for modifier in &MODIFIERS {
            sql.push_str(&(modifier.apply)(self, blueprint, column));
        }
        sql
    }

    pub fn modify_unsigned(&self, _blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        if column.is_unsigned() {
            " unsigned".to_string()
        } else {
            String::new()
        }
    }

    pub fn modify_nullable(&self, _blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        if column.is_nullable() {
            " null".to_string()
        } else {
            " not null".to_string()
        }
    }

    pub fn modify_default(&self, _blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        column
            .default_value()
            .map(|value| format!(" default {}", value.to_sql(&self.wrap)))
            .unwrap_or_default()
    }

    pub fn modify_on_update(&self, _blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        column
            .on_update()
            .map(|expression| format!(" on update {expression}"))
            .unwrap_or_default()
    }

    /// Serial auto-increment columns become the primary key unless the
    /// blueprint declares one, or an earlier column already claimed it.
    /// Custom types are restated as-is and never claim the key.
    pub fn modify_increment(&self, blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        if !column.is_auto_increment() {
            return String::new();
        }

        let column_type = column.column_type();
        if matches!(column_type, ColumnType::Custom(_)) {
            return " auto_increment".to_string();
        }
        if !column_type.is_serial() {
            return String::new();
        }

        if blueprint.has_command(CommandName::Primary) || !claims_primary_key(blueprint, column) {
            " auto_increment".to_string()
        } else {
            " auto_increment primary key".to_string()
        }
    }

    pub fn modify_comment(&self, _blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        column
            .comment()
            .map(|comment| format!(" comment {}", self.wrap.quote(comment)))
            .unwrap_or_default()
    }

    pub fn modify_after(&self, _blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        column
            .after()
            .map(|after| format!(" after {}", self.wrap.column(after)))
            .unwrap_or_default()
    }

    pub fn modify_first(&self, _blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> String {
        if column.is_first() {
            " first".to_string()
        } else {
            String::new()
        }
    }
}

fn claims_primary_key(blueprint: &dyn Blueprint, column: &dyn ColumnDefinition) -> bool {
    blueprint
        .added_columns()
        .into_iter()
        .find(|added| added.column_type().is_serial() && added.is_auto_increment())
        .is_none_or(|first| first.name() == column.name())
}
