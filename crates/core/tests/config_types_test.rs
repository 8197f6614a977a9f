use ddlgram_core::{Flavor, GrammarConfig, Version};

#[test]
fn version_exposes_major_minor_patch() {
    let version = Version::new(8, 0, 3);

    assert_eq!(version.major, 8);
    assert_eq!(version.minor, 0);
    assert_eq!(version.patch, 3);
    assert_eq!(version.to_string(), "8.0.3");
}

#[test]
fn version_orders_component_wise() {
    assert!(Version::new(5, 7, 44) < Version::new(8, 0, 3));
    assert!(Version::new(8, 0, 2) < Version::new(8, 0, 3));
    assert!(Version::new(10, 5, 2) > Version::new(10, 4, 99));
}

#[test]
fn grammar_config_defaults_to_mysql_without_version() {
    let config = GrammarConfig::new("goravel", "goravel_");

    assert_eq!(config.database, "goravel");
    assert_eq!(config.prefix, "goravel_");
    assert_eq!(config.server_version, "");
    assert_eq!(config.flavor, Flavor::Mysql);
}

#[test]
fn grammar_config_loads_from_yaml() {
    let config: GrammarConfig = serde_yaml::from_str(
        "database: shop\nprefix: s_\nserver_version: 10.4.1\nflavor: mariadb\n",
    )
    .expect("grammar config yaml should parse");

    assert_eq!(
        config,
        GrammarConfig::new("shop", "s_").with_server_version("10.4.1", Flavor::MariaDb)
    );
    assert_eq!(config.flavor.to_string(), "MariaDB");
}

#[test]
fn grammar_config_rejects_unknown_fields() {
    let result = serde_yaml::from_str::<GrammarConfig>("database: shop\nhost: localhost\n");

    assert!(result.is_err(), "unknown field must be rejected");
}
