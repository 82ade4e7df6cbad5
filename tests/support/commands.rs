//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use serde_json::Value;
use std::process::Output;

impl Test {
    /// Create a vaultshift command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - VAULTSHIFT_ADDR pointing at the test store file
    /// - Current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vaultshift").expect("failed to find vaultshift binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("VAULTSHIFT_ADDR", self.store_path());
        cmd.env_remove("VAULTSHIFT_NAMESPACE");
        cmd.env_remove("VAULTSHIFT_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `vaultshift mount`.
    pub fn mount(&self, path: &str, engine: &str) -> Output {
        self.cmd()
            .args(["mount", path, "--engine-type", engine])
            .output()
            .expect("failed to run vaultshift mount")
    }

    /// Store one leaf by importing a single-key document from stdin.
    pub fn seed(&self, path: &str, value: &str) {
        let (parent, key) = path.rsplit_once('/').expect("seed path needs a parent");
        let document = serde_json::json!({ key: value }).to_string();
        let output = self
            .cmd()
            .args(["import", parent, "-"])
            .write_stdin(document)
            .output()
            .expect("failed to run vaultshift import");
        assert!(
            output.status.success(),
            "Failed to seed {}: {}",
            path,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Shortcut for `vaultshift copy`.
    pub fn copy(&self, source: &str, target: &str) -> Output {
        self.cmd()
            .args(["copy", source, target])
            .output()
            .expect("failed to run vaultshift copy")
    }

    /// Shortcut for `vaultshift move`, answering the prompt with `answer`.
    pub fn relocate(&self, source: &str, target: &str, answer: &str) -> Output {
        self.cmd()
            .args(["move", source, target])
            .write_stdin(answer)
            .output()
            .expect("failed to run vaultshift move")
    }

    /// Shortcut for `vaultshift move --auto-approve`.
    pub fn relocate_approved(&self, source: &str, target: &str) -> Output {
        self.cmd()
            .args(["move", source, target, "--auto-approve"])
            .output()
            .expect("failed to run vaultshift move")
    }

    /// Shortcut for `vaultshift delete`, answering the prompt with `answer`.
    pub fn delete(&self, path: &str, answer: &str) -> Output {
        self.cmd()
            .args(["delete", path])
            .write_stdin(answer)
            .output()
            .expect("failed to run vaultshift delete")
    }

    /// Shortcut for `vaultshift export --format json`, parsed.
    pub fn export_json(&self, path: &str) -> Value {
        let output = self
            .cmd()
            .args(["export", path, "--format", "json"])
            .output()
            .expect("failed to run vaultshift export");
        assert!(
            output.status.success(),
            "export failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("export output is not JSON")
    }

    /// Read the raw store file.
    pub fn store_json(&self) -> Value {
        let contents = std::fs::read(self.store_path()).expect("store file missing");
        serde_json::from_slice(&contents).expect("store file is not JSON")
    }

    /// Mount-relative leaf paths stored under `mount` in the root namespace.
    pub fn leaf_paths(&self, mount: &str) -> Vec<String> {
        let store = self.store_json();
        store["namespaces"]["root"]["mounts"][mount]["secrets"]
            .as_object()
            .map(|secrets| secrets.keys().cloned().collect())
            .unwrap_or_default()
    }
}
