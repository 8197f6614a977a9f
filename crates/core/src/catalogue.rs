use serde::{Deserialize, Serialize};

/// Column metadata as normalized from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Column {
    pub autoincrement: bool,
    pub collation: Option<String>,
    pub comment: String,
    pub default: Option<String>,
    pub extra: String,
    pub generation_expression: Option<String>,
    pub name: String,
    pub nullable: bool,
    /// Full physical type, e.g. `int unsigned` or `varchar(255)`.
    pub column_type: String,
    /// Bare type name, e.g. `int`.
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    pub index_type: String,
    pub primary: bool,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub foreign_schema: String,
    pub foreign_table: String,
    pub foreign_columns: Vec<String>,
    pub on_update: String,
    pub on_delete: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Type {
    pub name: String,
    pub schema: String,
    pub implicit: bool,
    pub kind: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Table {
    pub name: String,
    pub schema: String,
    pub size: u64,
    pub comment: String,
    pub engine: Option<String>,
    pub collation: Option<String>,
}

impl Table {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct View {
    pub name: String,
    pub schema: String,
    pub definition: String,
}

impl View {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// Raw catalogue rows, before normalization.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DbColumn {
    pub name: String,
    pub type_name: String,
    pub column_type: String,
    pub collation: Option<String>,
    pub nullable: String,
    pub default: Option<String>,
    pub comment: String,
    pub generation_expression: Option<String>,
    pub extra: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DbIndex {
    pub name: String,
    pub columns: String,
    pub index_type: String,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DbForeignKey {
    pub name: String,
    pub columns: String,
    pub foreign_schema: String,
    pub foreign_table: String,
    pub foreign_columns: String,
    pub on_update: String,
    pub on_delete: String,
}
