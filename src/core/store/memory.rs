//! In-memory store backend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use super::SecretStore;
use crate::core::document::SecretDocument;
use crate::core::mount::{EngineContext, EngineType, Mount};
use crate::core::path;
use crate::error::{Result, StoreError};

/// A stored leaf with its kv2-style metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSecret {
    pub value: Value,
    /// Starts at 1; kv2 mounts bump it on every overwrite.
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct MountState {
    engine: EngineType,
    #[serde(default)]
    secrets: BTreeMap<String, StoredSecret>,
}

/// Store held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    mounts: BTreeMap<String, MountState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MemoryStore::add_mount`] for tests and fixtures.
    ///
    /// Re-adding an existing mount is a no-op.
    pub fn with_mount(mut self, mount_path: &str, engine: EngineType) -> Self {
        let _ = self.add_mount(mount_path, engine);
        self
    }

    /// Register a new mount.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MountExists` if the mount is already present,
    /// or `PathError` if the mount path is empty or malformed.
    pub fn add_mount(&mut self, mount_path: &str, engine: EngineType) -> Result<()> {
        let key = path::require_non_empty(mount_path)?;
        if self.mounts.contains_key(&key) {
            return Err(StoreError::MountExists(key).into());
        }
        self.mounts.insert(
            key,
            MountState {
                engine,
                secrets: BTreeMap::new(),
            },
        );
        Ok(())
    }

    /// Read a single leaf with its metadata.
    pub fn get(&self, ctx: &EngineContext, leaf_path: &str) -> Option<&StoredSecret> {
        let key = path::normalize(leaf_path).ok()?;
        self.mounts.get(ctx.mount())?.secrets.get(&key)
    }

    /// Total number of leaves across all mounts.
    pub fn len(&self) -> usize {
        self.mounts.values().map(|m| m.secrets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail on the first stored value that is a mapping.
    ///
    /// Such a value cannot be told apart from nested secrets once exported,
    /// so stores loaded from disk are checked before use.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MappingValue` with the full path of the value.
    pub fn check_values(&self) -> Result<()> {
        for (mount_path, state) in &self.mounts {
            if let Some((key, _)) = state.secrets.iter().find(|(_, s)| s.value.is_object()) {
                return Err(StoreError::MappingValue(path::join(mount_path, key)).into());
            }
        }
        Ok(())
    }

    fn mount_state(&self, ctx: &EngineContext) -> Result<&MountState> {
        let state = self
            .mounts
            .get(ctx.mount())
            .ok_or_else(|| StoreError::UnknownMount(ctx.mount().to_string()))?;
        check_engine(ctx, state)?;
        Ok(state)
    }

    fn mount_state_mut(&mut self, ctx: &EngineContext) -> Result<&mut MountState> {
        let state = self
            .mounts
            .get_mut(ctx.mount())
            .ok_or_else(|| StoreError::UnknownMount(ctx.mount().to_string()))?;
        check_engine(ctx, state)?;
        Ok(state)
    }

    fn leaves_within<'a>(
        state: &'a MountState,
        base: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a StoredSecret)> + 'a {
        state
            .secrets
            .iter()
            .filter(move |(key, _)| path::is_within(key, base))
    }
}

fn check_engine(ctx: &EngineContext, state: &MountState) -> Result<()> {
    if state.engine != ctx.engine() {
        return Err(StoreError::EngineMismatch {
            mount: ctx.mount().to_string(),
            actual: state.engine.to_string(),
            requested: ctx.engine().to_string(),
        }
        .into());
    }
    Ok(())
}

impl SecretStore for MemoryStore {
    fn mounts(&self) -> Result<Vec<Mount>> {
        Ok(self
            .mounts
            .iter()
            .map(|(mount_path, state)| Mount::new(mount_path, state.engine))
            .collect())
    }

    fn export_subtree(&self, ctx: &EngineContext, subtree: &str) -> Result<SecretDocument> {
        let base = path::normalize(subtree)?;
        let state = self.mount_state(ctx)?;

        let mut document = SecretDocument::empty();
        for (key, secret) in Self::leaves_within(state, &base) {
            document.insert_leaf(key, secret.value.clone())?;
        }
        trace!(mount = %ctx.mount(), path = %base, leaves = document.leaf_count(), "exported");
        Ok(document)
    }

    fn write_leaf(&mut self, ctx: &EngineContext, leaf_path: &str, value: &Value) -> Result<()> {
        let key = path::require_non_empty(leaf_path)?;
        if value.is_object() {
            return Err(StoreError::MappingValue(ctx.display_path(&key)).into());
        }
        let state = self.mount_state_mut(ctx)?;

        let conflict = |reason: &str| StoreError::Conflict {
            path: ctx.display_path(&key),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = key.split(path::SEPARATOR).collect();
        for end in 1..segments.len() {
            if state.secrets.contains_key(&segments[..end].join("/")) {
                return Err(conflict("a parent path holds a secret value").into());
            }
        }
        if state
            .secrets
            .keys()
            .any(|existing| existing != &key && path::is_within(existing, &key))
        {
            return Err(conflict("path holds nested secrets").into());
        }

        let versioned = state.engine.is_versioned();
        let now = Utc::now();
        state
            .secrets
            .entry(key.clone())
            .and_modify(|secret| {
                secret.value = value.clone();
                secret.updated_at = now;
                if versioned {
                    secret.version += 1;
                }
            })
            .or_insert_with(|| StoredSecret {
                value: value.clone(),
                version: 1,
                updated_at: now,
            });

        trace!(path = %ctx.display_path(&key), "wrote leaf");
        Ok(())
    }

    fn delete_leaf(&mut self, ctx: &EngineContext, leaf_path: &str) -> Result<()> {
        let key = path::require_non_empty(leaf_path)?;
        let state = self.mount_state_mut(ctx)?;
        if state.secrets.remove(&key).is_none() {
            return Err(StoreError::NotFound(ctx.display_path(&key)).into());
        }
        trace!(path = %ctx.display_path(&key), "deleted leaf");
        Ok(())
    }

    fn list_leaf_paths(&self, ctx: &EngineContext, subtree: &str) -> Result<Vec<String>> {
        let base = path::normalize(subtree)?;
        let state = self.mount_state(ctx)?;
        Ok(Self::leaves_within(state, &base)
            .map(|(key, _)| key.clone())
            .collect())
    }
}
