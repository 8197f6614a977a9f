use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Wrap;

/// Logical column type carried by a column definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    BigInteger,
    Boolean,
    Char,
    Date,
    DateTime,
    DateTimeTz,
    Decimal,
    Double,
    Enum,
    Float,
    Integer,
    Json,
    Jsonb,
    LongText,
    MediumInteger,
    MediumText,
    SmallInteger,
    #[default]
    String,
    Text,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
    TinyInteger,
    TinyText,
    /// Physical type text rendered verbatim.
    Custom(String),
}

impl ColumnType {
    #[must_use]
    pub const fn is_serial(&self) -> bool {
        matches!(
            self,
            Self::BigInteger
                | Self::Integer
                | Self::MediumInteger
                | Self::SmallInteger
                | Self::TinyInteger
        )
    }

    #[must_use]
    pub const fn tracks_current_time(&self) -> bool {
        matches!(
            self,
            Self::DateTime | Self::DateTimeTz | Self::Timestamp | Self::TimestampTz
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Raw SQL such as `CURRENT_TIMESTAMP`, never quoted.
    Expression { expression: String },
    String(String),
}

impl DefaultValue {
    #[must_use]
    pub fn expression(expression: impl Into<String>) -> Self {
        Self::Expression {
            expression: expression.into(),
        }
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    #[must_use]
    pub fn to_sql(&self, wrap: &Wrap) -> String {
        match self {
            Self::Bool(true) => "'1'".to_string(),
            Self::Bool(false) => "'0'".to_string(),
            Self::Integer(value) => format!("'{value}'"),
            Self::Float(value) => format!("'{value}'"),
            Self::Expression { expression } => expression.clone(),
            Self::String(value) => wrap.quote(value),
        }
    }
}

/// Read access to one column of a blueprint, plus the two setters used to
/// resolve implicit defaults before rendering.
pub trait ColumnDefinition: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn column_type(&self) -> ColumnType;
    fn length(&self) -> Option<u32>;
    fn precision(&self) -> Option<u32>;
    fn total(&self) -> Option<u32>;
    fn places(&self) -> Option<u32>;
    fn is_nullable(&self) -> bool;
    fn default_value(&self) -> Option<&DefaultValue>;
    fn is_auto_increment(&self) -> bool;
    fn is_unsigned(&self) -> bool;
    fn comment(&self) -> Option<&str>;
    fn allowed(&self) -> &[String];
    fn on_update(&self) -> Option<&str>;
    fn after(&self) -> Option<&str>;
    fn is_first(&self) -> bool;
    fn uses_current(&self) -> bool;
    fn uses_current_on_update(&self) -> bool;

    fn set_default(&mut self, value: DefaultValue);
    fn set_on_update(&mut self, expression: String);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    Add,
    Change,
    Comment,
    Create,
    Drop,
    DropColumn,
    DropForeign,
    DropFullText,
    DropIfExists,
    DropIndex,
    DropPrimary,
    DropUnique,
    Foreign,
    FullText,
    Index,
    Primary,
    Rename,
    RenameColumn,
    RenameIndex,
    TableComment,
    Unique,
}

impl CommandName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Change => "change",
            Self::Comment => "comment",
            Self::Create => "create",
            Self::Drop => "drop",
            Self::DropColumn => "drop_column",
            Self::DropForeign => "drop_foreign",
            Self::DropFullText => "drop_full_text",
            Self::DropIfExists => "drop_if_exists",
            Self::DropIndex => "drop_index",
            Self::DropPrimary => "drop_primary",
            Self::DropUnique => "drop_unique",
            Self::Foreign => "foreign",
            Self::FullText => "full_text",
            Self::Index => "index",
            Self::Primary => "primary",
            Self::Rename => "rename",
            Self::RenameColumn => "rename_column",
            Self::RenameIndex => "rename_index",
            Self::TableComment => "table_comment",
            Self::Unique => "unique",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One schema operation recorded on a blueprint.
#[derive(Debug)]
pub struct Command {
    pub name: CommandName,
    pub algorithm: Option<String>,
    pub column: Option<Box<dyn ColumnDefinition>>,
    pub columns: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub index: Option<String>,
    pub on: Option<String>,
    pub references: Vec<String>,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
    pub value: Option<String>,
    pub should_be_skipped: bool,
}

impl Command {
    #[must_use]
    pub fn new(name: CommandName) -> Self {
        Self {
            name,
            algorithm: None,
            column: None,
            columns: Vec::new(),
            from: None,
            to: None,
            index: None,
            on: None,
            references: Vec::new(),
            on_delete: None,
            on_update: None,
            value: None,
            should_be_skipped: false,
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl ColumnDefinition + 'static) -> Self {
        self.column = Some(Box::new(column));
        self
    }

    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    #[must_use]
    pub fn with_from_to(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self.to = Some(to.into());
        self
    }

    #[must_use]
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    #[must_use]
    pub fn with_references<I, S>(mut self, on: impl Into<String>, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on = Some(on.into());
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_on_delete(mut self, action: impl Into<String>) -> Self {
        self.on_delete = Some(action.into());
        self
    }

    #[must_use]
    pub fn with_on_update(mut self, action: impl Into<String>) -> Self {
        self.on_update = Some(action.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Table-level view of a schema builder as consumed by a grammar.
pub trait Blueprint {
    fn table_name(&self) -> &str;
    fn commands(&self) -> &[Command];
    fn commands_mut(&mut self) -> &mut [Command];
    fn added_columns(&self) -> Vec<&dyn ColumnDefinition>;
    fn added_columns_mut(&mut self) -> Vec<&mut dyn ColumnDefinition>;

    fn has_command(&self, name: CommandName) -> bool {
        self.commands().iter().any(|command| command.name == name)
    }
}
