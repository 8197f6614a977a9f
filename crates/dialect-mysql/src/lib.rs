mod catalogue;
mod grammar;
mod json;
mod modifiers;
mod processor;
mod queries;
mod types;
mod version;

use ddlgram_core::Wrap;

pub use catalogue::Catalogue;
pub use grammar::MysqlGrammar;
pub use modifiers::{MODIFIERS, Modifier, ModifierFn};
pub use processor::MysqlProcessor;
pub use version::{
    MARIADB_RENAME_COLUMN_VERSION, MYSQL_RENAME_COLUMN_VERSION, ServerVersion,
    parse_server_version,
};

/// Backtick identifiers and backslash-aware literals.
#[must_use]
pub fn mysql_wrap(prefix: &str) -> Wrap {
    Wrap::new(prefix)
        .with_identifier_quote('`')
        .with_backslash_escapes()
}
