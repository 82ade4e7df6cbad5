//! Subtree export.

use tracing::debug;

use crate::core::document::{self, SecretDocument};
use crate::core::mount::EngineContext;
use crate::core::store::SecretStore;
use crate::error::{Result, TransferError};

/// Read the whole subtree at `path` into a document rooted at the mount.
///
/// All or nothing: a store failure aborts the export and discards whatever
/// was read.
///
/// # Errors
///
/// Returns `TransferError::Export` wrapping the store error.
pub fn export<S: SecretStore + ?Sized>(
    store: &S,
    ctx: &EngineContext,
    path: &str,
) -> Result<SecretDocument> {
    let document = store
        .export_subtree(ctx, path)
        .map_err(|e| TransferError::Export {
            path: ctx.display_path(path),
            source: Box::new(e),
        })?;
    debug!(
        path = %ctx.display_path(path),
        leaves = document.leaf_count(),
        "exported subtree"
    );
    Ok(document)
}

/// Reject an empty export so copy and move never run as a silent no-op.
///
/// # Errors
///
/// Returns `TransferError::EmptySource` if `document` has no leaves.
pub fn require_content(document: &SecretDocument, display_path: &str) -> Result<()> {
    if document.leaf_count() == 0 {
        return Err(TransferError::EmptySource(display_path.to_string()).into());
    }
    Ok(())
}

/// Export `path` and return the document rooted at that branch.
///
/// A leaf at `path` comes back wrapped under its last segment.
///
/// # Errors
///
/// Returns the errors of [`export`] and [`require_content`], and
/// `DocumentError::PathNotFound` from extraction.
pub fn branch<S: SecretStore + ?Sized>(
    store: &S,
    ctx: &EngineContext,
    path: &str,
) -> Result<SecretDocument> {
    let exported = export(store, ctx, path)?;
    require_content(&exported, &ctx.display_path(path))?;
    document::extract(&exported, path)
}
