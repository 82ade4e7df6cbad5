//! File-backed store implementation.
//!
//! Keeps every namespace of the store in one JSON file. Mutations are
//! applied to the in-memory state of the selected namespace and then the
//! whole file is rewritten atomically (temp file + rename, 0600 on Unix).

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{MemoryStore, SecretStore};
use crate::core::constants;
use crate::core::document::SecretDocument;
use crate::core::mount::{EngineContext, EngineType, Mount};
use crate::error::{Result, StoreError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    namespaces: BTreeMap<String, MemoryStore>,
}

/// Store persisted as a JSON file.
///
/// A missing file behaves as an empty store; it is created on the first
/// mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    namespace: String,
    file: StoreFile,
}

impl FileStore {
    /// Open the store file at `path`, scoped to `namespace`.
    ///
    /// `None` selects the root namespace.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ReadFailed` if the file exists but cannot be
    /// read, `StoreError::Corrupt` if it is not a valid store file, or
    /// `StoreError::MappingValue` if a stored secret value is a mapping.
    pub fn open(path: impl Into<PathBuf>, namespace: Option<&str>) -> Result<Self> {
        let path = path.into();
        let namespace = namespace
            .map(|ns| ns.trim_matches('/').to_string())
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| constants::ROOT_NAMESPACE.to_string());

        let file = if path.exists() {
            #[cfg(unix)]
            warn_on_loose_permissions(&path);

            let contents = fs::read_to_string(&path).map_err(StoreError::ReadFailed)?;
            if contents.trim().is_empty() {
                StoreFile::default()
            } else {
                serde_json::from_str(&contents).map_err(StoreError::Corrupt)?
            }
        } else {
            StoreFile::default()
        };
        for state in file.namespaces.values() {
            state.check_values()?;
        }

        debug!(path = %path.display(), namespace = %namespace, "opened store file");
        Ok(Self {
            path,
            namespace,
            file,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register a mount and persist the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MountExists` if the mount is already present.
    pub fn add_mount(&mut self, mount_path: &str, engine: EngineType) -> Result<()> {
        self.state_mut().add_mount(mount_path, engine)?;
        self.save()
    }

    fn state(&self) -> Option<&MemoryStore> {
        self.file.namespaces.get(&self.namespace)
    }

    fn state_mut(&mut self) -> &mut MemoryStore {
        self.file
            .namespaces
            .entry(self.namespace.clone())
            .or_default()
    }

    fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(StoreError::WriteFailed)?;

        let contents = serde_json::to_vec_pretty(&self.file)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(StoreError::WriteFailed)?;
        tmp.write_all(&contents).map_err(StoreError::WriteFailed)?;
        tmp.as_file().sync_all().map_err(StoreError::WriteFailed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
                .map_err(StoreError::WriteFailed)?;
        }

        tmp.persist(&self.path)
            .map_err(|e| StoreError::WriteFailed(e.error))?;
        debug!(path = %self.path.display(), "saved store file");
        Ok(())
    }
}

/// Warn when the store file is readable by others (Unix only).
#[cfg(unix)]
fn warn_on_loose_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "store file is accessible by other users; run chmod 600"
            );
        }
    }
}

impl SecretStore for FileStore {
    fn mounts(&self) -> Result<Vec<Mount>> {
        self.state()
            .map_or_else(|| Ok(Vec::new()), |state| state.mounts())
    }

    fn export_subtree(&self, ctx: &EngineContext, path: &str) -> Result<SecretDocument> {
        match self.state() {
            Some(state) => state.export_subtree(ctx, path),
            None => Err(StoreError::UnknownMount(ctx.mount().to_string()).into()),
        }
    }

    fn write_leaf(&mut self, ctx: &EngineContext, path: &str, value: &Value) -> Result<()> {
        self.state_mut().write_leaf(ctx, path, value)?;
        self.save()
    }

    fn delete_leaf(&mut self, ctx: &EngineContext, path: &str) -> Result<()> {
        self.state_mut().delete_leaf(ctx, path)?;
        self.save()
    }

    fn list_leaf_paths(&self, ctx: &EngineContext, path: &str) -> Result<Vec<String>> {
        match self.state() {
            Some(state) => state.list_leaf_paths(ctx, path),
            None => Err(StoreError::UnknownMount(ctx.mount().to_string()).into()),
        }
    }
}
