use ddlgram_core::Wrap;

#[test]
fn value_quotes_identifier_and_keeps_wildcard() {
    let wrap = backtick_wrap("");

    assert_eq!(wrap.value("*"), "*");
    assert_eq!(wrap.value("value"), "`value`");
    assert_eq!(wrap.value("we`ird"), "`we``ird`");
}

#[test]
fn default_identifier_quote_is_double_quote() {
    let wrap = Wrap::new("");

    assert_eq!(wrap.value("users"), "\"users\"");
    assert_eq!(wrap.value("a\"b"), "\"a\"\"b\"");
}

#[test]
fn table_applies_prefix_to_table_segment_only() {
    let wrap = backtick_wrap("goravel_");

    assert_eq!(wrap.table("users"), "`goravel_users`");
    assert_eq!(wrap.table("shop.users"), "`shop`.`goravel_users`");
    assert_eq!(wrap.table("users as u"), "`goravel_users` as `goravel_u`");
}

#[test]
fn column_handles_qualified_and_aliased_names() {
    let wrap = backtick_wrap("goravel_");

    assert_eq!(wrap.column("id"), "`id`");
    assert_eq!(wrap.column("users.id"), "`goravel_users`.`id`");
    assert_eq!(wrap.column("id as user_id"), "`id` as `user_id`");
}

#[test]
fn batch_helpers_join_and_prefix() {
    let wrap = backtick_wrap("");

    assert_eq!(wrap.columns(&["a", "b"]), vec!["`a`", "`b`"]);
    assert_eq!(wrap.columnize(&["role_id", "user_id"]), "`role_id`, `user_id`");
    assert_eq!(
        wrap.prefix_array("drop", &wrap.columns(&["id", "name"])),
        vec!["drop `id`", "drop `name`"]
    );
    assert!(wrap.columnize::<&str>(&[]).is_empty());
}

#[test]
fn quote_escapes_single_quotes_and_backslashes() {
    let wrap = backtick_wrap("");

    assert_eq!(wrap.quote("It's"), "'It''s'");
    assert_eq!(wrap.quote(r"C:\temp"), r"'C:\\temp'");
    assert_eq!(wrap.quotes(&["a", "b"]), vec!["'a'", "'b'"]);
    assert_eq!(Wrap::new("").quote(r"C:\temp"), r"'C:\temp'");
}

#[test]
fn not_prefixes_only_when_negated() {
    let wrap = backtick_wrap("");

    assert_eq!(wrap.not("json_length(`data`)", true), "not json_length(`data`)");
    assert_eq!(wrap.not("json_length(`data`)", false), "json_length(`data`)");
}

#[test]
fn json_field_and_path_splits_arrow_segments() {
    let wrap = backtick_wrap("");

    assert_eq!(
        wrap.json_field_and_path("data->details"),
        ("`data`".to_string(), ", '$.\"details\"'".to_string())
    );
    assert_eq!(
        wrap.json_field_and_path("data->details->subdetails[0]"),
        (
            "`data`".to_string(),
            ", '$.\"details\".\"subdetails\"[0]'".to_string()
        )
    );
    assert_eq!(
        wrap.json_field_and_path("data"),
        ("`data`".to_string(), String::new())
    );
}

#[test]
fn json_path_escapes_literal_breaking_characters() {
    let wrap = backtick_wrap("");

    assert_eq!(wrap.json_path("it's"), "'$.\"it''s\"'");
    assert_eq!(wrap.json_path(r"a\b"), r#"'$."a\\\\b"'"#);
    assert_eq!(wrap.json_path("items[0][1]"), "'$.\"items\"[0][1]'");
}

#[test]
fn json_path_attaches_bare_indexes_to_previous_member() {
    let wrap = backtick_wrap("");

    assert_eq!(wrap.json_path("x->[0]"), "'$.\"x\"[0]'");
    assert_eq!(wrap.json_path("x->[0]->y"), "'$.\"x\"[0].\"y\"'");
    assert_eq!(wrap.json_path("[1][2]"), "'$[1][2]'");
}

#[test]
fn json_path_escapes_double_quotes_inside_keys() {
    let wrap = backtick_wrap("");

    assert_eq!(
        wrap.json_path(r#"a'b->c"d->[0]"#),
        r#"'$."a''b"."c\\"d"[0]'"#
    );
    assert_eq!(Wrap::new("").json_path(r#"c"d"#), r#"'$."c\"d"'"#);
}

fn backtick_wrap(prefix: &str) -> Wrap {
    Wrap::new(prefix)
        .with_identifier_quote('`')
        .with_backslash_escapes()
}
