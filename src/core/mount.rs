//! Mounts and engine selection.
//!
//! A mount is the top-level namespace of the store; its engine type decides
//! storage semantics (kv1 unversioned, kv2 versioned).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::path;
use crate::error::{ConfigError, Result, StoreError};

/// KV secret engine version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Kv1,
    #[default]
    Kv2,
}

impl EngineType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Kv1 => "kv1",
            Self::Kv2 => "kv2",
        }
    }

    /// Whether writes keep a version counter.
    pub fn is_versioned(self) -> bool {
        matches!(self, Self::Kv2)
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kv1" => Ok(Self::Kv1),
            "kv2" => Ok(Self::Kv2),
            other => Err(ConfigError::InvalidEngine(other.to_string())),
        }
    }
}

/// A configured mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    /// Mount path without surrounding separators, e.g. `secret`.
    pub path: String,
    pub engine: EngineType,
}

impl Mount {
    pub fn new(mount_path: &str, engine: EngineType) -> Self {
        Self {
            path: mount_path.trim_matches(path::SEPARATOR).to_string(),
            engine,
        }
    }
}

/// The mount and engine version every store call of one command runs against.
///
/// Fixed for the whole invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineContext {
    mount: String,
    engine: EngineType,
}

impl EngineContext {
    pub fn new(mount: impl Into<String>, engine: EngineType) -> Self {
        Self {
            mount: mount.into().trim_matches(path::SEPARATOR).to_string(),
            engine,
        }
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn engine(&self) -> EngineType {
        self.engine
    }

    /// Absolute display form of a mount-relative path, e.g. `secret/app/db`.
    pub fn display_path(&self, relative: &str) -> String {
        path::join(&self.mount, relative)
    }
}

/// Split a user-supplied path into its mount and the remainder inside it.
///
/// The longest segment-aligned mount prefix wins. The remainder is
/// normalized and may be empty when `full_path` names the mount itself.
///
/// # Errors
///
/// Returns `StoreError::UnknownMount` if no mount matches.
pub fn split<'a>(mounts: &'a [Mount], full_path: &str) -> Result<(&'a Mount, String)> {
    let normalized = path::normalize(full_path)?;

    let mount = mounts
        .iter()
        .filter(|m| !m.path.is_empty() && path::is_within(&normalized, &m.path))
        .max_by_key(|m| m.path.len())
        .ok_or_else(|| StoreError::UnknownMount(full_path.to_string()))?;

    let remainder = path::relative_to(&normalized, &mount.path)
        .unwrap_or_default()
        .to_string();

    debug!(mount = %mount.path, remainder = %remainder, "resolved path");
    Ok((mount, remainder))
}
