//! Tests for error handling, configuration and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    for command in ["copy", "move", "import", "export", "mount"] {
        assert_stdout_contains(&output, command);
    }
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vaultshift");
}

#[test]
fn test_verbose_flag_logs_to_stderr() {
    let t = Test::with_secrets(&[("secret/a/b", "1")]);

    let output = t
        .cmd()
        .args(["--verbose", "copy", "secret/a", "secret/c"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "exported subtree");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vaultshift");
}

#[test]
fn test_http_address_is_rejected() {
    let t = Test::new();

    t.cmd()
        .args(["--address", "https://vault.example:8200", "copy", "secret/a", "secret/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only file stores are supported"))
        .stderr(predicate::str::contains("VAULTSHIFT_ADDR"));
}

#[test]
fn test_file_scheme_address() {
    let t = Test::new();
    let address = format!("file://{}", t.dir.path().join("other.json").display());

    let output = t
        .cmd()
        .env("VAULTSHIFT_ADDR", &address)
        .args(["mount", "kv"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.dir.path().join("other.json").exists());
    assert!(!t.store_path().exists());
}

#[test]
fn test_address_from_settings_file() {
    let t = Test::new();
    let store = t.dir.path().join("configured.json");
    std::fs::create_dir_all(t.home.path().join(".vaultshift")).unwrap();
    std::fs::write(
        t.home.path().join(".vaultshift/config.toml"),
        format!("address = {:?}\n", store.display().to_string()),
    )
    .unwrap();

    let output = t
        .cmd()
        .env_remove("VAULTSHIFT_ADDR")
        .args(["mount", "secret"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(store.exists());
}

#[test]
fn test_namespaces_are_isolated() {
    let t = Test::with_secrets(&[("secret/a/b", "1")]);

    let output = t
        .cmd()
        .args(["--namespace", "team", "copy", "secret/a", "secret/c"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no mount matches");

    let output = t
        .cmd()
        .env("VAULTSHIFT_NAMESPACE", "team")
        .args(["mount", "secret"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.store_json()["namespaces"]["team"]["mounts"]["secret"].is_object());
}

#[test]
fn test_duplicate_mount_fails() {
    let t = Test::with_mounts(&[("secret", "kv2")]);

    t.cmd()
        .args(["mount", "secret/", "--engine-type", "kv1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mount 'secret' already exists"));
}

#[test]
fn test_invalid_engine_type_is_a_usage_error() {
    let t = Test::with_mounts(&[("secret", "kv2")]);

    t.cmd()
        .args(["mount", "other", "--engine-type", "kv9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid engine type 'kv9'"));
}

#[test]
fn test_corrupt_store_file_fails() {
    let t = Test::new();
    std::fs::write(t.store_path(), "{ not json").unwrap();

    let output = t.copy("secret/a", "secret/b");
    assert_failure(&output);
    assert_stderr_contains(&output, "store file is corrupt");
}

#[cfg(unix)]
#[test]
fn test_store_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_mounts(&[("secret", "kv2")]);
    let mode = std::fs::metadata(t.store_path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
