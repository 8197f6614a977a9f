use std::{fs, process::Command};

use tempfile::tempdir;

fn run_ddlgram(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ddlgram"))
        .args(args)
        .env_remove("DDLGRAM_PREFIX")
        .env_remove("DDLGRAM_SERVER_VERSION")
        .output()
        .unwrap_or_else(|error| panic!("failed to run ddlgram: {error}"))
}

#[test]
fn missing_blueprint_file_is_an_io_error_with_path() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let missing = tempdir.path().join("missing.yml");
    let missing = missing.to_string_lossy().into_owned();

    let output = run_ddlgram(&["compile", missing.as_str()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[io]"), "stderr must carry io category, got: {stderr}");
    assert!(
        stderr.contains("while reading") && stderr.contains("missing.yml"),
        "stderr must name the file, got: {stderr}"
    );
}

#[test]
fn malformed_blueprint_is_a_parse_error() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let path = tempdir.path().join("broken.yml");
    fs::write(&path, "table: users\ncolumns: nope\n")
        .unwrap_or_else(|error| panic!("failed to write blueprint: {error}"));
    let path = path.to_string_lossy().into_owned();

    let output = run_ddlgram(&["compile", path.as_str()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[parse]"), "stderr must carry parse category, got: {stderr}");
    assert!(stderr.contains("while parsing"), "stderr must include context, got: {stderr}");
}

#[test]
fn missing_legacy_rename_column_keeps_typed_category() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let path = tempdir.path().join("rename.yml");
    fs::write(
        &path,
        "table: users\ncommands:\n  - name: rename_column\n    from: before\n    to: after\n",
    )
    .unwrap_or_else(|error| panic!("failed to write blueprint: {error}"));
    let path = path.to_string_lossy().into_owned();

    let output = run_ddlgram(&["--server-version", "8.0.2", "compile", path.as_str()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[compile]"), "stderr must carry compile category, got: {stderr}");
    assert!(
        stderr.contains("while compiling blueprint"),
        "stderr must include CLI context from anyhow::Context, got: {stderr}"
    );
    assert!(
        stderr.contains("column `before` does not exist"),
        "stderr must retain typed compile details, got: {stderr}"
    );
}
