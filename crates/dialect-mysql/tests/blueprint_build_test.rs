use ddlgram_core::{
    Blueprint, Column, ColumnDefinition, ColumnSpec, ColumnType, Command, CommandName,
    CompileError, Error, Flavor, TableBlueprint,
};
use ddlgram_dialect_mysql::MysqlGrammar;

#[test]
fn create_blueprint_compiles_primary_key_once() {
    let grammar = grammar("8.0.36");
    let mut blueprint = TableBlueprint::create("users");
    blueprint
        .column(ColumnSpec::new("id", ColumnType::BigInteger).unsigned())
        .column(ColumnSpec::new("email", ColumnType::String))
        .primary(["id"])
        .unique("users_email_unique", ["email"]);

    let statements = blueprint
        .to_sql(&grammar, &[], &[])
        .expect("create blueprint should compile");

    assert_eq!(
        statements,
        vec![
            "create table `goravel_users` (`id` bigint unsigned not null, `email` varchar(255) not null, primary key (`id`))",
            "alter table `goravel_users` add unique `users_email_unique`(`email`)",
        ]
    );
    assert!(blueprint.commands()[1].should_be_skipped);
}

#[test]
fn alter_blueprint_compiles_commands_in_order() {
    let grammar = grammar("8.0.36");
    let mut blueprint = TableBlueprint::alter("users");
    blueprint
        .column(ColumnSpec::new("nickname", ColumnType::String).nullable().with_after("name"))
        .index("users_nickname_index", ["nickname"])
        .push(
            Command::new(CommandName::Foreign)
                .with_index("fk_users_role_id")
                .with_columns(["role_id"])
                .with_references("roles", ["id"])
                .with_on_delete("cascade"),
        )
        .drop_column(["legacy"])
        .rename_column("name", "full_name")
        .comment("people");

    let statements = blueprint
        .to_sql(&grammar, &[], &[])
        .expect("alter blueprint should compile");

    assert_eq!(
        statements,
        vec![
            "alter table `goravel_users` add `nickname` varchar(255) null after `name`",
            "alter table `goravel_users` add index `users_nickname_index`(`nickname`)",
            "alter table `goravel_users` add constraint `fk_users_role_id` foreign key (`role_id`) references `goravel_roles` (`id`) on delete cascade",
            "alter table `goravel_users` drop `legacy`",
            "alter table `goravel_users` rename column `name` to `full_name`",
            "alter table `goravel_users` comment = 'people'",
        ]
    );
}

#[test]
fn empty_statements_are_dropped_from_the_plan() {
    let grammar = grammar("8.0.36");
    let mut blueprint = TableBlueprint::alter("users");
    blueprint
        .push(Command::new(CommandName::Comment))
        .push(Command::new(CommandName::Drop));

    let statements = blueprint
        .to_sql(&grammar, &[], &[])
        .expect("blueprint should compile");

    assert_eq!(statements, vec!["drop table `goravel_users`"]);
}

#[test]
fn empty_blueprint_compiles_to_nothing() {
    let grammar = grammar("8.0.36");
    let mut blueprint = TableBlueprint::alter("users");

    let statements = blueprint
        .to_sql(&grammar, &[], &[])
        .expect("empty blueprint should compile");

    assert!(statements.is_empty());
}

#[test]
fn legacy_rename_uses_catalogue_columns() {
    let grammar = grammar("5.7.44");
    let mut blueprint = TableBlueprint::alter("users");
    blueprint.rename_column("name", "full_name");
    let columns = [Column {
        name: "name".to_string(),
        column_type: "varchar(100)".to_string(),
        nullable: false,
        ..Column::default()
    }];

    let statements = blueprint
        .to_sql(&grammar, &columns, &[])
        .expect("legacy rename should compile");

    assert_eq!(
        statements,
        vec!["alter table `goravel_users` change `name` `full_name` varchar(100) not null"]
    );
}

#[test]
fn legacy_rename_failure_stops_the_build() {
    let grammar = grammar("5.7.44");
    let mut blueprint = TableBlueprint::alter("users");
    blueprint.rename_column("name", "full_name");

    let error = blueprint
        .to_sql(&grammar, &[], &[])
        .expect_err("missing catalogue column should fail");

    assert!(matches!(
        error,
        Error::Compile(CompileError::ColumnNotFound { .. })
    ));
    assert_eq!(blueprint.commands()[0].from.as_deref(), Some("name"));
}

#[test]
fn added_column_survives_compilation() {
    let grammar = grammar("8.0.36");
    let mut blueprint = TableBlueprint::alter("users");
    blueprint.column(
        ColumnSpec::new("created_at", ColumnType::Timestamp).use_current(),
    );

    blueprint
        .to_sql(&grammar, &[], &[])
        .expect("alter blueprint should compile");

    let column = blueprint.commands()[0]
        .column
        .as_deref()
        .expect("add command should keep its column after compilation");
    assert_eq!(column.name(), "created_at");
    assert!(column.default_value().is_some());
}

fn grammar(version: &str) -> MysqlGrammar {
    MysqlGrammar::new("goravel", "goravel_", version, Flavor::Mysql)
}
