//! Constants used throughout vaultshift.
//!
//! Centralizes magic strings and configuration values.

/// Settings directory relative to HOME (~/.vaultshift).
pub const CONFIG_DIR: &str = ".vaultshift";

/// Settings file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Store file used when no address is configured.
pub const DEFAULT_STORE_FILE: &str = "store.json";

/// Namespace key used when no namespace is selected.
pub const ROOT_NAMESPACE: &str = "root";

/// Environment variable holding the store address.
pub const ENV_ADDRESS: &str = "VAULTSHIFT_ADDR";

/// Environment variable holding the namespace.
pub const ENV_NAMESPACE: &str = "VAULTSHIFT_NAMESPACE";

/// Environment variable holding the log filter.
pub const ENV_LOG: &str = "VAULTSHIFT_LOG";

/// The only answer that approves a deletion.
pub const AFFIRMATIVE: &str = "y";

/// Name prefix of the per-invocation scratch file.
pub const SCRATCH_PREFIX: &str = "vaultshift-export-";

/// Argument that reads an import document from stdin.
pub const STDIN_SOURCE: &str = "-";
