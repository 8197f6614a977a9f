use ddlgram_core::{
    Column, DbColumn, DbForeignKey, DbIndex, ForeignKey, Index, Processor, Type,
};

const PRIMARY_INDEX_NAME: &str = "primary";
const AUTO_INCREMENT_EXTRA: &str = "auto_increment";
const NULLABLE_YES: &str = "YES";

#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlProcessor;

impl MysqlProcessor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Processor for MysqlProcessor {
    fn process_columns(&self, columns: Vec<DbColumn>) -> Vec<Column> {
        columns
            .into_iter()
            .map(|column| Column {
                autoincrement: column.extra == AUTO_INCREMENT_EXTRA,
                collation: column.collation,
                comment: column.comment,
                default: column.default,
                extra: column.extra,
                generation_expression: column.generation_expression,
                name: column.name,
                nullable: column.nullable == NULLABLE_YES,
                column_type: column.column_type,
                type_name: column.type_name,
            })
            .collect()
    }

    fn process_foreign_keys(&self, foreign_keys: Vec<DbForeignKey>) -> Vec<ForeignKey> {
        foreign_keys
            .into_iter()
            .map(|foreign_key| ForeignKey {
                name: foreign_key.name,
                columns: split_list(&foreign_key.columns),
                foreign_schema: foreign_key.foreign_schema,
                foreign_table: foreign_key.foreign_table,
                foreign_columns: split_list(&foreign_key.foreign_columns),
                on_update: foreign_key.on_update.to_lowercase(),
                on_delete: foreign_key.on_delete.to_lowercase(),
            })
            .collect()
    }

    fn process_indexes(&self, indexes: Vec<DbIndex>) -> Vec<Index> {
        indexes
            .into_iter()
            .map(|index| {
                let name = index.name.to_lowercase();
                Index {
                    primary: name == PRIMARY_INDEX_NAME,
                    columns: split_list(&index.columns),
                    index_type: index.index_type.to_lowercase(),
                    unique: index.unique,
                    name,
                }
            })
            .collect()
    }

    fn process_types(&self, types: Vec<Type>) -> Vec<Type> {
        types
    }
}

fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(ToString::to_string).collect()
}
