//! Secret store abstraction.
//!
//! Every pipeline stage talks to the store through the [`SecretStore`]
//! trait. Two backends ship with the crate:
//!
//! - [`MemoryStore`]: in-process, used by tests and as the state engine of
//!   the file backend
//! - [`FileStore`]: a JSON file on disk, written atomically after every
//!   mutation
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file next to `fs.rs`
//! 3. Re-export from this module and teach `config::open_store` its address
//!    scheme

use serde_json::Value;

use crate::core::document::SecretDocument;
use crate::core::mount::{self, EngineContext, Mount};
use crate::error::Result;

mod fs;
mod memory;

pub use fs::FileStore;
pub use memory::{MemoryStore, StoredSecret};

/// Leaf-addressable secret store.
///
/// Paths passed to these methods are relative to the mount named by the
/// [`EngineContext`]. A leaf path never has another leaf as an ancestor, so
/// the store always maps onto a [`SecretDocument`] without conflicts.
pub trait SecretStore {
    /// Mounts known to the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn mounts(&self) -> Result<Vec<Mount>>;

    /// Split a full path into its mount and the remainder inside it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownMount` if no mount is a prefix of
    /// `full_path`.
    fn resolve(&self, full_path: &str) -> Result<(Mount, String)> {
        let mounts = self.mounts()?;
        let (mount, remainder) = mount::split(&mounts, full_path)?;
        Ok((mount.clone(), remainder))
    }

    /// Read every leaf at or below `path` into a document rooted at the mount.
    ///
    /// Exporting `app` where `app/db/user` exists yields
    /// `{app: {db: {user: ...}}}`. Nothing under `path` yields an empty node.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on an unknown mount, an engine mismatch, or a
    /// backend read failure.
    fn export_subtree(&self, ctx: &EngineContext, path: &str) -> Result<SecretDocument>;

    /// Write one leaf, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the path would nest under an
    /// existing leaf or shadow existing leaves.
    fn write_leaf(&mut self, ctx: &EngineContext, path: &str, value: &Value) -> Result<()>;

    /// Delete one leaf.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no leaf exists at `path`.
    fn delete_leaf(&mut self, ctx: &EngineContext, path: &str) -> Result<()>;

    /// List every leaf path at or below `path`, mount-relative and sorted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on an unknown mount or an engine mismatch.
    fn list_leaf_paths(&self, ctx: &EngineContext, path: &str) -> Result<Vec<String>>;
}

impl<S: SecretStore + ?Sized> SecretStore for Box<S> {
    fn mounts(&self) -> Result<Vec<Mount>> {
        (**self).mounts()
    }

    fn export_subtree(&self, ctx: &EngineContext, path: &str) -> Result<SecretDocument> {
        (**self).export_subtree(ctx, path)
    }

    fn write_leaf(&mut self, ctx: &EngineContext, path: &str, value: &Value) -> Result<()> {
        (**self).write_leaf(ctx, path, value)
    }

    fn delete_leaf(&mut self, ctx: &EngineContext, path: &str) -> Result<()> {
        (**self).delete_leaf(ctx, path)
    }

    fn list_leaf_paths(&self, ctx: &EngineContext, path: &str) -> Result<Vec<String>> {
        (**self).list_leaf_paths(ctx, path)
    }
}
