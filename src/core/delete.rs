//! Executing an approved deletion plan.

use tracing::{debug, trace, warn};

use crate::core::plan::DeletionPlan;
use crate::core::store::SecretStore;
use crate::error::{Result, TransferError};

/// Outcome of a deletion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Delete every path in `plan`. Consumes the plan.
///
/// Best effort: every path is attempted even after a failure.
///
/// # Errors
///
/// Returns `TransferError::Delete` listing every failed path once all
/// deletions have been attempted.
pub fn delete<S: SecretStore + ?Sized>(store: &mut S, plan: DeletionPlan) -> Result<DeleteReport> {
    let ctx = plan.context().clone();
    let mut report = DeleteReport::default();

    for leaf in plan.paths() {
        trace!(path = %ctx.display_path(leaf), "deleting");
        match store.delete_leaf(&ctx, leaf) {
            Ok(()) => report.deleted.push(leaf.clone()),
            Err(e) => {
                warn!(path = %ctx.display_path(leaf), error = %e, "delete failed, continuing");
                report.failed.push((ctx.display_path(leaf), e.to_string()));
            }
        }
    }

    debug!(
        deleted = report.deleted.len(),
        failed = report.failed.len(),
        "deletion finished"
    );

    if !report.failed.is_empty() {
        return Err(TransferError::Delete {
            failed: report.failed,
        }
        .into());
    }
    Ok(report)
}
