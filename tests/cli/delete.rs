//! Tests for the delete command.

use crate::support::*;

#[test]
fn test_delete_lists_then_deletes_on_y() {
    let t = Test::with_secrets(&[
        ("secret/app/a", "1"),
        ("secret/app/nested/b", "2"),
        ("secret/keep", "3"),
    ]);

    let output = t.delete("secret/app", "y\n");
    assert_success(&output);
    assert_stdout_contains(&output, "Deleting secret [secret/app/a]");
    assert_stdout_contains(&output, "Deleting secret [secret/app/nested/b]");
    assert_stderr_contains(&output, "delete the 2 secrets listed above");
    assert_stdout_contains(&output, "deleted 2 secrets from secret/app");
    assert_leaves(&t, "secret", &["keep"]);
}

#[test]
fn test_delete_declined_keeps_everything() {
    let t = Test::with_secrets(THREE_LEAVES);

    let output = t.delete("secret/src", "n\n");
    assert_success(&output);
    assert_stderr_contains(&output, "delete aborted");
    assert_eq!(t.leaf_paths("secret").len(), 3);
}

#[test]
fn test_delete_with_closed_stdin_aborts() {
    let t = Test::with_secrets(THREE_LEAVES);

    let output = t.delete("secret/src", "");
    assert_success(&output);
    assert_stderr_contains(&output, "no confirmation");
    assert_eq!(t.leaf_paths("secret").len(), 3);
}

#[test]
fn test_delete_auto_approve_skips_prompt() {
    let t = Test::with_secrets(&[("secret/src/a", "1"), ("secret/srcx/b", "2")]);

    let output = t
        .cmd()
        .args(["delete", "secret/src", "-y"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_excludes(&output, "listed above");
    assert_leaves(&t, "secret", &["srcx/b"]);
}

#[test]
fn test_delete_empty_path_fails() {
    let t = Test::with_secrets(&[("secret/app/a", "1")]);

    let output = t.delete("secret/none", "y\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "no secrets found under 'secret/none'");
    assert_leaves(&t, "secret", &["app/a"]);
}
