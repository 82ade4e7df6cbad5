//! Tests for the import command.

use crate::support::*;
use serde_json::json;

#[test]
fn test_import_yaml_file() {
    let t = Test::with_mounts(&[("secret", "kv2")]);
    let file = t.write_file("app.yaml", SAMPLE_YAML);

    let output = t
        .cmd()
        .args(["import", "secret/app", file.to_str().unwrap()])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "imported 4 secrets from 1 source");

    assert_eq!(
        t.export_json("secret/app"),
        json!({
            "api": {"token": "t0ken"},
            "database": {"password": "hunter2", "port": 5432, "user": "admin"}
        })
    );
}

#[test]
fn test_import_json_file_and_stdin_in_order() {
    let t = Test::with_mounts(&[("secret", "kv2")]);
    let file = t.write_file("cache.json", SAMPLE_JSON);

    let output = t
        .cmd()
        .args(["import", "secret/", file.to_str().unwrap(), "-"])
        .write_stdin("debug: true\n")
        .output()
        .unwrap();
    assert_success(&output);

    let exported = t.export_json("secret");
    assert_eq!(exported["cache"]["url"], "redis://localhost:6379");
    assert_eq!(exported["debug"], true);
    assert_eq!(
        t.store_json()["namespaces"]["root"]["mounts"]["secret"]["secrets"]["debug"]["version"],
        2
    );
}

#[test]
fn test_import_directory_skips_bad_files() {
    let t = Test::with_mounts(&[("secret", "kv2")]);
    t.write_file("bulk/one.yaml", "one: 1\n");
    t.write_file("bulk/two.yaml", SCALAR_YAML);
    t.write_file("bulk/deeper/three.json", r#"{"three": 3}"#);

    let output = t
        .cmd()
        .args(["import", "secret/bulk", "bulk"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "two.yaml");
    assert_stderr_contains(&output, "document root must be a mapping");
    assert_leaves(&t, "secret", &["bulk/one", "bulk/three"]);
}

#[test]
fn test_import_single_bad_file_fails() {
    let t = Test::with_mounts(&[("secret", "kv2")]);
    let file = t.write_file("list.yaml", SCALAR_YAML);

    let output = t
        .cmd()
        .args(["import", "secret/x", file.to_str().unwrap()])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "document root must be a mapping");
    assert!(t.leaf_paths("secret").is_empty());
}

#[test]
fn test_import_bad_file_does_not_stop_later_files() {
    let t = Test::with_mounts(&[("secret", "kv2")]);
    let bad = t.write_file("bad.yaml", SCALAR_YAML);
    let good = t.write_file("good.yaml", "token: t\n");

    let output = t
        .cmd()
        .args([
            "import",
            "secret/x",
            bad.to_str().unwrap(),
            good.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "skipped");
    assert_stderr_contains(&output, "bad.yaml");
    assert_stdout_contains(&output, "imported 1 secret from 1 source");
    assert_leaves(&t, "secret", &["x/token"]);
}

#[test]
fn test_import_missing_file_fails() {
    let t = Test::with_mounts(&[("secret", "kv2")]);

    let output = t
        .cmd()
        .args(["import", "secret/x", "does-not-exist.yaml"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read does-not-exist.yaml");
}

#[test]
fn test_import_decrypt_requires_private_key() {
    let t = Test::with_mounts(&[("secret", "kv2")]);
    let file = t.write_file("enc.yaml", "irrelevant");

    let output = t
        .cmd()
        .args(["import", "secret/x", file.to_str().unwrap(), "--decrypt"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "--decrypt requires --private-key");
}

#[test]
fn test_import_decrypts_age_file() {
    use age::secrecy::ExposeSecret;
    use std::io::Write;

    let t = Test::with_mounts(&[("secret", "kv2")]);
    let identity = age::x25519::Identity::generate();
    let key_file = t.write_file(
        "key.txt",
        format!(
            "# public key: {}\n{}\n",
            identity.to_public(),
            identity.to_string().expose_secret()
        ),
    );

    let recipient = identity.to_public();
    let encryptor =
        age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
            .unwrap();
    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(
            age::armor::ArmoredWriter::wrap_output(&mut encrypted, age::armor::Format::AsciiArmor)
                .unwrap(),
        )
        .unwrap();
    writer.write_all(SAMPLE_YAML.as_bytes()).unwrap();
    writer.finish().unwrap().finish().unwrap();
    let file = t.write_file("secrets.yaml.age", encrypted);

    let output = t
        .cmd()
        .args([
            "import",
            "secret/app",
            file.to_str().unwrap(),
            "-d",
            "-p",
            key_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.export_json("secret/app/database/user"), json!({"user": "admin"}));
}
