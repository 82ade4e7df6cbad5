//! Test fixtures and constants.

/// Three leaves under `secret/src`, used by the move scenarios.
pub const THREE_LEAVES: &[(&str, &str)] = &[
    ("secret/src/a", "1"),
    ("secret/src/b", "2"),
    ("secret/src/nested/c", "3"),
];

/// Nested YAML document for import tests.
pub const SAMPLE_YAML: &str = "\
database:
  user: admin
  password: hunter2
  port: 5432
api:
  token: t0ken
";

/// The same kind of document in JSON.
pub const SAMPLE_JSON: &str = r#"{"cache": {"url": "redis://localhost:6379"}, "debug": false}"#;

/// A document whose root is not a mapping.
pub const SCALAR_YAML: &str = "- one\n- two\n";
