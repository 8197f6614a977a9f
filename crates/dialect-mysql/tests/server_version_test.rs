use ddlgram_core::{Flavor, Version};
use ddlgram_dialect_mysql::{
    MARIADB_RENAME_COLUMN_VERSION, MYSQL_RENAME_COLUMN_VERSION, MysqlGrammar, ServerVersion,
    parse_server_version,
};

#[test]
fn detect_plain_mysql_version() {
    let detected = ServerVersion::detect("8.0.36");

    assert_eq!(detected.version, "8.0.36");
    assert_eq!(detected.flavor, Flavor::Mysql);
    assert_eq!(detected.parsed(), Some(Version::new(8, 0, 36)));
}

#[test]
fn detect_mariadb_with_replication_prefix() {
    let detected = ServerVersion::detect("5.5.5-10.5.2-MariaDB-1:10.5.2+maria~focal");

    assert_eq!(detected.version, "10.5.2");
    assert_eq!(detected.flavor, Flavor::MariaDb);
}

#[test]
fn detect_mariadb_without_replication_prefix() {
    let detected = ServerVersion::detect("10.11.2-MariaDB-log\n");

    assert_eq!(detected.version, "10.11.2");
    assert_eq!(detected.flavor, Flavor::MariaDb);
    assert_eq!(detected.parsed(), Some(Version::new(10, 11, 2)));
}

#[test]
fn parse_server_version_keeps_leading_digits() {
    assert_eq!(
        parse_server_version("8.0.36-0ubuntu0.22.04.1"),
        Some(Version::new(8, 0, 36))
    );
    assert_eq!(parse_server_version("8"), Some(Version::new(8, 0, 0)));
    assert_eq!(parse_server_version("5.7.44-log extra"), Some(Version::new(5, 7, 44)));
    assert_eq!(parse_server_version(""), None);
    assert_eq!(parse_server_version("mysql"), None);
}

#[test]
fn rename_column_thresholds() {
    assert_eq!(MYSQL_RENAME_COLUMN_VERSION, Version::new(8, 0, 3));
    assert_eq!(MARIADB_RENAME_COLUMN_VERSION, Version::new(10, 5, 2));
}

#[test]
fn grammar_parses_version_once_at_construction() {
    let grammar = MysqlGrammar::new("goravel", "goravel_", "5.7.2", Flavor::Mysql);

    assert_eq!(grammar.server_version(), Some(Version::new(5, 7, 2)));
    assert_eq!(grammar.flavor(), Flavor::Mysql);
    assert_eq!(grammar.database(), "goravel");
    assert_eq!(grammar.wrap().prefix(), "goravel_");
}
