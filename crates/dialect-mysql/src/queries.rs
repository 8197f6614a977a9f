// Catalogue lookups against information_schema. Database and table names are
// embedded as escaped string literals since the statements are run unprepared.

use ddlgram_core::Wrap;

pub(crate) const VERSION_QUERY: &str = "SELECT VERSION() AS value;";
pub(crate) const DISABLE_FOREIGN_KEY_CHECKS: &str = "SET FOREIGN_KEY_CHECKS=0;";
pub(crate) const ENABLE_FOREIGN_KEY_CHECKS: &str = "SET FOREIGN_KEY_CHECKS=1;";

pub(crate) fn columns_query(wrap: &Wrap, database: &str, table: &str) -> String {
    format!(
        "select column_name as `name`, data_type as `type_name`, column_type as `type`, \
         collation_name as `collation`, is_nullable as `nullable`, \
         column_default as `default`, column_comment as `comment`, \
         generation_expression as `expression`, extra as `extra` \
         from information_schema.columns where table_schema = {} and table_name = {} \
         order by ordinal_position asc",
        wrap.quote(database),
        wrap.quote(table),
    )
}

pub(crate) fn indexes_query(wrap: &Wrap, database: &str, table: &str) -> String {
    format!(
        "select index_name as `name`, group_concat(column_name order by seq_in_index) as `columns`, \
         index_type as `type`, not non_unique as `unique` \
         from information_schema.statistics where table_schema = {} and table_name = {} \
         group by index_name, index_type, non_unique",
        wrap.quote(database),
        wrap.quote(table),
    )
}

pub(crate) fn foreign_keys_query(wrap: &Wrap, database: &str, table: &str) -> String {
    format!(
        r#"SELECT
    kc.constraint_name AS `name`,
    GROUP_CONCAT(kc.column_name ORDER BY kc.ordinal_position) AS `columns`,
    kc.referenced_table_schema AS `foreign_schema`,
    kc.referenced_table_name AS `foreign_table`,
    GROUP_CONCAT(kc.referenced_column_name ORDER BY kc.ordinal_position) AS `foreign_columns`,
    rc.update_rule AS `on_update`,
    rc.delete_rule AS `on_delete`
FROM information_schema.key_column_usage kc
JOIN information_schema.referential_constraints rc
    ON kc.constraint_schema = rc.constraint_schema
    AND kc.constraint_name = rc.constraint_name
WHERE kc.table_schema = {}
    AND kc.table_name = {}
    AND kc.referenced_table_name IS NOT NULL
GROUP BY
    kc.constraint_name,
    kc.referenced_table_schema,
    kc.referenced_table_name,
    rc.update_rule,
    rc.delete_rule"#,
        wrap.quote(database),
        wrap.quote(table),
    )
}

pub(crate) fn tables_query(wrap: &Wrap, database: &str) -> String {
    format!(
        "select table_name as `name`, (data_length + index_length) as `size`, \
         table_comment as `comment`, engine as `engine`, table_collation as `collation` \
         from information_schema.tables where table_schema = {} \
         and table_type in ('BASE TABLE', 'SYSTEM VERSIONED') order by table_name",
        wrap.quote(database),
    )
}

pub(crate) fn views_query(wrap: &Wrap, database: &str) -> String {
    format!(
        "select table_name as `name`, view_definition as `definition` \
         from information_schema.views where table_schema = {} order by table_name",
        wrap.quote(database),
    )
}
