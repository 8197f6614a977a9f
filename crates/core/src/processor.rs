use crate::{Column, DbColumn, DbForeignKey, DbIndex, ForeignKey, Index, Type};

/// Normalizes raw catalogue rows into schema records.
pub trait Processor: Send + Sync {
    fn process_columns(&self, columns: Vec<DbColumn>) -> Vec<Column>;
    fn process_foreign_keys(&self, foreign_keys: Vec<DbForeignKey>) -> Vec<ForeignKey>;
    fn process_indexes(&self, indexes: Vec<DbIndex>) -> Vec<Index>;
    fn process_types(&self, types: Vec<Type>) -> Vec<Type>;
}
