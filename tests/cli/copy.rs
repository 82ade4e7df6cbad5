//! Tests for the copy command.

use crate::support::*;

#[test]
fn test_copy_branch_under_new_prefix() {
    let t = Test::with_secrets(&[("secret/a/b", "1"), ("secret/a/c", "2")]);

    let output = t.copy("secret/a", "secret/new/");
    assert_success(&output);
    assert_stdout_contains(&output, "copied 2 secrets");

    assert_leaves(&t, "secret", &["a/b", "a/c", "new/b", "new/c"]);
    let exported = t.export_json("secret/new");
    assert_eq!(exported, serde_json::json!({"b": "1", "c": "2"}));
}

#[test]
fn test_copy_target_with_and_without_separator() {
    let t = Test::with_secrets(&[("secret/a/b", "1")]);

    assert_success(&t.copy("secret/a", "secret/x"));
    assert_success(&t.copy("secret/a", "secret/y/"));
    assert_leaves(&t, "secret", &["a/b", "x/b", "y/b"]);
}

#[test]
fn test_copy_single_leaf_keeps_its_name() {
    let t = Test::with_secrets(&[("secret/app/token", "t0ken")]);

    assert_success(&t.copy("secret/app/token", "secret/backup"));
    assert_leaves(&t, "secret", &["app/token", "backup/token"]);
}

#[test]
fn test_copy_empty_source_fails_without_writes() {
    let t = Test::with_secrets(&[("secret/a/b", "1")]);

    let output = t.copy("secret/missing", "secret/new");
    assert_failure(&output);
    assert_stderr_contains(&output, "no secrets found under 'secret/missing'");
    assert_leaves(&t, "secret", &["a/b"]);
}

#[test]
fn test_copy_unknown_mount_suggests_mount_command() {
    let t = Test::with_secrets(&[("secret/a/b", "1")]);

    let output = t.copy("nowhere/a", "secret/new");
    assert_failure(&output);
    assert_stderr_contains(&output, "no mount matches path 'nowhere/a'");
    assert_stderr_contains(&output, "vaultshift mount");
}

#[test]
fn test_copy_across_mounts_with_different_engines() {
    let t = Test::with_mounts(&[("secret", "kv2"), ("legacy", "kv1")]);
    t.seed("secret/app/db/user", "admin");

    assert_success(&t.copy("secret/app", "legacy/app"));
    assert_leaves(&t, "legacy", &["app/db/user"]);
    assert_eq!(t.store_json()["namespaces"]["root"]["mounts"]["legacy"]["engine"], "kv1");
}

#[test]
fn test_copy_forced_engine_mismatch_fails() {
    let t = Test::with_secrets(&[("secret/a/b", "1")]);

    let output = t
        .cmd()
        .args(["copy", "secret/a", "secret/new", "--engine-type", "kv1"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "mount 'secret' is kv2, but kv1 was requested");
    assert_leaves(&t, "secret", &["a/b"]);
}

#[test]
fn test_copy_onto_existing_branch_fails_fast() {
    let t = Test::with_secrets(&[("secret/a/b", "1"), ("secret/a/c", "2")]);
    t.seed("secret/blocked/c/inner", "kept");

    let output = t.copy("secret/a", "secret/blocked");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to write 'secret/blocked/c'");
    assert_leaves(&t, "secret", &["a/b", "a/c", "blocked/b", "blocked/c/inner"]);
}
