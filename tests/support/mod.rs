//! Test support utilities for vaultshift integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated store file and home directory.
///
/// Child processes get the store address through `VAULTSHIFT_ADDR`, so
/// tests can safely run in parallel.
pub struct Test {
    /// Working directory for import/export files
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new environment with an empty store.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create an environment with the given mounts registered.
    pub fn with_mounts(mounts: &[(&str, &str)]) -> Self {
        let t = Self::new();
        for (path, engine) in mounts {
            let output = t.mount(path, engine);
            assert!(
                output.status.success(),
                "Failed to mount {}: {}",
                path,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Create an environment with a kv2 `secret` mount holding `leaves`.
    pub fn with_secrets(leaves: &[(&str, &str)]) -> Self {
        let t = Self::with_mounts(&[("secret", "kv2")]);
        for (path, value) in leaves {
            t.seed(path, value);
        }
        t
    }

    /// Path of the store file.
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("store.json")
    }

    /// Write a file in the working directory and return its path.
    pub fn write_file(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }
}
