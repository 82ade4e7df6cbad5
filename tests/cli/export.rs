//! Tests for the export command.

use crate::support::*;

#[test]
fn test_export_yaml_to_stdout() {
    let t = Test::with_secrets(&[("secret/app/db/user", "admin"), ("secret/other/x", "y")]);

    let output = t.cmd().args(["export", "secret/app"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "db:\n  user: admin\n");
}

#[test]
fn test_export_to_file() {
    let t = Test::with_secrets(&[("secret/app/db/user", "admin")]);

    let output = t
        .cmd()
        .args(["export", "secret/app", "--format", "json", "--output", "out.json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "exported 1 secret to out.json");
    assert_stdout_excludes(&output, "admin");

    let written = std::fs::read_to_string(t.dir.path().join("out.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value, serde_json::json!({"db": {"user": "admin"}}));
}

#[test]
fn test_export_empty_path_fails() {
    let t = Test::with_secrets(&[("secret/app/db/user", "admin")]);

    let output = t.cmd().args(["export", "secret/none"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no secrets found under 'secret/none'");
}

#[test]
fn test_export_then_import_reproduces_tree() {
    let t = Test::with_secrets(&[("secret/app/db/user", "admin"), ("secret/app/token", "t")]);

    let output = t
        .cmd()
        .args(["export", "secret/app", "--output", "app.yaml"])
        .output()
        .unwrap();
    assert_success(&output);

    let output = t
        .cmd()
        .args(["import", "secret/restored", "app.yaml"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.export_json("secret/restored"), t.export_json("secret/app"));
}
