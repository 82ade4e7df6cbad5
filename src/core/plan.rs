//! Deletion planning for moves and deletes.
//!
//! The plan is enumerated from the store after the copy has been written,
//! so it reflects the store at planning time. If something else writes
//! under the source between export and planning, the plan can contain
//! leaves that were never copied; [`DeletionPlan::uncopied`] exposes them.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::mount::EngineContext;
use crate::core::path;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Immutable list of leaf paths slated for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    ctx: EngineContext,
    source: String,
    paths: Vec<String>,
}

impl DeletionPlan {
    /// Mount and engine the plan applies to.
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// The subtree the plan was computed for.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Mount-relative leaf paths, sorted.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Planned paths that are not among `copied` (mount-relative source
    /// paths that were read and written to the target).
    pub fn uncopied<'a>(&'a self, copied: &[String]) -> Vec<&'a str> {
        let copied: BTreeSet<&str> = copied.iter().map(String::as_str).collect();
        self.paths
            .iter()
            .map(String::as_str)
            .filter(|p| !copied.contains(p))
            .collect()
    }
}

/// Enumerate every leaf under `source` as it exists in the store now.
///
/// # Errors
///
/// Returns the store error if the listing fails.
pub fn plan<S: SecretStore + ?Sized>(
    store: &S,
    ctx: &EngineContext,
    source: &str,
) -> Result<DeletionPlan> {
    let source = path::normalize(source)?;
    let mut paths = store.list_leaf_paths(ctx, &source)?;
    paths.sort();
    paths.dedup();

    debug!(source = %ctx.display_path(&source), count = paths.len(), "planned deletions");
    Ok(DeletionPlan {
        ctx: ctx.clone(),
        source,
        paths,
    })
}
