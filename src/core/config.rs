//! Connection settings.
//!
//! Resolves which store file to open and which namespace to use. Flags and
//! environment variables are handled by clap; this module fills the gaps
//! from `~/.vaultshift/config.toml` and falls back to
//! `~/.vaultshift/store.json` in the root namespace.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::store::FileStore;
use crate::error::{ConfigError, Result};

/// Contents of `~/.vaultshift/config.toml`. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl Settings {
    /// Directory holding the settings file and the default store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
    pub fn dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(constants::CONFIG_DIR))
            .ok_or_else(|| ConfigError::NoHomeDir.into())
    }

    /// Load the settings file from the user's home directory.
    ///
    /// A missing file yields default settings.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::dir()?.join(constants::CONFIG_FILE))
    }

    /// Load settings from `path`; a missing file yields default settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }
}

/// Where the store lives and which namespace to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub store_path: PathBuf,
    pub namespace: Option<String>,
}

impl Connection {
    /// Resolve the connection from flag values (already merged with the
    /// environment by clap), then the settings file, then the default store.
    ///
    /// The settings file is only read when a value is still missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedAddress` for network addresses, and
    /// settings or home directory errors when a fallback is needed.
    pub fn resolve(address: Option<&str>, namespace: Option<&str>) -> Result<Self> {
        if let (Some(address), Some(namespace)) = (address, namespace) {
            return Self::from_parts(Some(address), Some(namespace), &Settings::default(), None);
        }
        let settings = Settings::load()?;
        let default_dir = match (address, &settings.address) {
            (None, None) => Some(Settings::dir()?),
            _ => None,
        };
        Self::from_parts(address, namespace, &settings, default_dir.as_deref())
    }

    /// Combine explicit values with `settings`; `default_dir` supplies the
    /// default store location when no address is set anywhere.
    pub fn from_parts(
        address: Option<&str>,
        namespace: Option<&str>,
        settings: &Settings,
        default_dir: Option<&Path>,
    ) -> Result<Self> {
        let store_path = match address.or(settings.address.as_deref()) {
            Some(address) => parse_address(address)?,
            None => default_dir
                .ok_or(ConfigError::NoHomeDir)?
                .join(constants::DEFAULT_STORE_FILE),
        };
        let namespace = namespace
            .or(settings.namespace.as_deref())
            .filter(|ns| !ns.trim_matches('/').is_empty())
            .map(str::to_string);

        debug!(store = %store_path.display(), namespace = ?namespace, "resolved connection");
        Ok(Self {
            store_path,
            namespace,
        })
    }

    /// Open the file store this connection points at.
    pub fn open_store(&self) -> Result<FileStore> {
        FileStore::open(&self.store_path, self.namespace.as_deref())
    }
}

/// Turn a store address into a file path.
///
/// `file://` is stripped; `http://` and `https://` are rejected.
///
/// # Errors
///
/// Returns `ConfigError::UnsupportedAddress` for network or empty addresses.
pub fn parse_address(address: &str) -> Result<PathBuf> {
    let trimmed = address.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Err(ConfigError::UnsupportedAddress(address.to_string()).into());
    }
    let path = trimmed.strip_prefix("file://").unwrap_or(trimmed);
    if path.is_empty() {
        return Err(ConfigError::UnsupportedAddress(address.to_string()).into());
    }
    Ok(PathBuf::from(path))
}
